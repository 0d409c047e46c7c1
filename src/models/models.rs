use serde::{Serialize, Deserialize};

#[derive(Serialize, Deserialize, Clone)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password: String,
    pub course: String,
    pub college: String,
    pub post_count: u32,
    pub followers_count: u32,
    pub following: Vec<String>,
    pub created_at: String,
}

#[derive(Serialize, Deserialize)]
pub struct TokenData {
    pub user_id: String,
    pub created_at: String,
}

#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PostKind {
    Book,
    Notes,
    Personal,
    Question,
}

impl PostKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "book" => Some(PostKind::Book),
            "notes" => Some(PostKind::Notes),
            "personal" => Some(PostKind::Personal),
            "question" => Some(PostKind::Question),
            _ => None,
        }
    }
}

#[derive(Serialize, Deserialize, Clone)]
pub struct FileAttachment {
    pub base64: String,
    pub mime_type: String,
    pub original_name: String,
    pub kind: String,
}

#[derive(Serialize, Deserialize, Clone)]
pub struct Comment {
    pub id: String,
    pub user_id: String,
    pub content: String,
    pub created_at: String,
}

#[derive(Serialize, Deserialize, Clone)]
pub struct Post {
    pub id: String,
    pub user_id: String,
    #[serde(rename = "type")]
    pub kind: PostKind,
    pub title: String,
    pub content: String,
    pub likes: u32,
    pub liked_by: Vec<String>,
    pub comments: Vec<Comment>,
    pub file: Option<FileAttachment>,
    pub created_at: String,
}

#[derive(Serialize, Deserialize, Clone)]
pub struct Note {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DeadlineKind {
    Assignment,
    Exam,
    Project,
    Event,
    Other,
}

impl DeadlineKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "assignment" => Some(DeadlineKind::Assignment),
            "exam" => Some(DeadlineKind::Exam),
            "project" => Some(DeadlineKind::Project),
            "event" => Some(DeadlineKind::Event),
            "other" => Some(DeadlineKind::Other),
            _ => None,
        }
    }
}

#[derive(Serialize, Deserialize, Clone)]
pub struct Deadline {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub description: String,
    pub due_date: String,
    #[serde(rename = "type")]
    pub kind: DeadlineKind,
    pub is_public: bool,
    pub college: String,
    pub created_at: String,
}

#[derive(Serialize, Deserialize, Clone)]
pub struct Message {
    pub id: String,
    pub sender_id: String,
    pub content: String,
    pub file: Option<FileAttachment>,
    pub created_at: String,
}

#[derive(Serialize, Deserialize, Clone)]
pub struct Group {
    pub id: String,
    pub name: String,
    pub description: String,
    pub tags: Vec<String>,
    pub creator_id: String,
    pub college: String,
    pub members: Vec<String>,
    pub messages: Vec<Message>,
    pub created_at: String,
}
