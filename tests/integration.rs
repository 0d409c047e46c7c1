use serde_json::json;
use std::sync::Mutex;

const BASE_URL: &str = "http://127.0.0.1:3000";
static TEST_LOCK: Mutex<()> = Mutex::new(());

fn lock_test() -> std::sync::MutexGuard<'static, ()> {
    TEST_LOCK.lock().unwrap()
}

/// Sign up a fresh user and return (token, user_id).
async fn signup(client: &reqwest::Client, name: &str, college: &str) -> (String, String) {
    let email = format!("{}_{}@{}.edu", name, uuid::Uuid::new_v4(), college);
    let body = json!({
        "name": name,
        "email": email,
        "password": "secret123",
        "course": "Computer Science",
        "college": college,
    });

    let resp = client
        .post(format!("{}/api/auth/signup", BASE_URL))
        .json(&body)
        .send()
        .await
        .expect("Failed to sign up");

    assert_eq!(resp.status(), 201);
    let data = resp.json::<serde_json::Value>().await.unwrap();
    let token = data["token"].as_str().expect("token missing").to_string();
    let user_id = data["user"]["id"].as_str().expect("user id missing").to_string();
    (token, user_id)
}

async fn me(client: &reqwest::Client, token: &str) -> serde_json::Value {
    let resp = client
        .get(format!("{}/api/auth/me", BASE_URL))
        .bearer_auth(token)
        .send()
        .await
        .expect("Failed to fetch /me");
    assert_eq!(resp.status(), 200);
    resp.json::<serde_json::Value>().await.unwrap()["user"].clone()
}

async fn create_post(client: &reqwest::Client, token: &str, title: &str) -> String {
    let resp = client
        .post(format!("{}/api/posts", BASE_URL))
        .bearer_auth(token)
        .json(&json!({
            "type": "notes",
            "title": title,
            "content": "shared lecture notes",
        }))
        .send()
        .await
        .expect("Failed to create post");
    assert_eq!(resp.status(), 201);
    let data = resp.json::<serde_json::Value>().await.unwrap();
    data["post"]["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_signup_login_me_flow() {
    let _lock = lock_test();
    let client = reqwest::Client::new();

    let email = format!("flow_{}@bvb.edu", uuid::Uuid::new_v4());
    let signup_resp = client
        .post(format!("{}/api/auth/signup", BASE_URL))
        .json(&json!({
            "name": "Flow Test",
            "email": email,
            "password": "secret123",
            "course": "ECE",
            "college": "bvb",
        }))
        .send()
        .await
        .expect("Failed to sign up");
    assert_eq!(signup_resp.status(), 201);
    let signup_data = signup_resp.json::<serde_json::Value>().await.unwrap();
    assert!(signup_data["user"].get("password").is_none(), "password hash leaked");

    // Duplicate email is a conflict
    let dup_resp = client
        .post(format!("{}/api/auth/signup", BASE_URL))
        .json(&json!({
            "name": "Flow Test",
            "email": email,
            "password": "secret123",
            "course": "ECE",
            "college": "bvb",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(dup_resp.status(), 409);

    let login_resp = client
        .post(format!("{}/api/auth/login", BASE_URL))
        .json(&json!({"email": email, "password": "secret123", "college": "bvb"}))
        .send()
        .await
        .unwrap();
    assert_eq!(login_resp.status(), 200);
    let token = login_resp.json::<serde_json::Value>().await.unwrap()["token"]
        .as_str()
        .unwrap()
        .to_string();

    let user = me(&client, &token).await;
    assert_eq!(user["email"], email);
    assert_eq!(user["post_count"], 0);
    assert_eq!(user["followers_count"], 0);
}

#[tokio::test]
async fn test_login_rejects_bad_credentials() {
    let _lock = lock_test();
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{}/api/auth/login", BASE_URL))
        .json(&json!({
            "email": "nobody@nowhere.edu",
            "password": "wrongpass",
            "college": "bvb",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);
}

#[tokio::test]
async fn test_post_lifecycle_and_ownership() {
    let _lock = lock_test();
    let client = reqwest::Client::new();

    let (u1_token, _) = signup(&client, "owner", "bvb").await;
    let (u2_token, _) = signup(&client, "intruder", "bvb").await;

    let post_id = create_post(&client, &u1_token, "Algo HW").await;
    assert_eq!(me(&client, &u1_token).await["post_count"], 1);

    // A non-owner delete is forbidden and leaves the count alone
    let forbidden = client
        .delete(format!("{}/api/posts/{}", BASE_URL, post_id))
        .bearer_auth(&u2_token)
        .send()
        .await
        .unwrap();
    assert_eq!(forbidden.status(), 403);
    assert_eq!(me(&client, &u1_token).await["post_count"], 1);

    // The owner can delete, and the count drops back
    let deleted = client
        .delete(format!("{}/api/posts/{}", BASE_URL, post_id))
        .bearer_auth(&u1_token)
        .send()
        .await
        .unwrap();
    assert_eq!(deleted.status(), 204);
    assert_eq!(me(&client, &u1_token).await["post_count"], 0);

    // The post is gone
    let gone = client
        .delete(format!("{}/api/posts/{}", BASE_URL, post_id))
        .bearer_auth(&u1_token)
        .send()
        .await
        .unwrap();
    assert_eq!(gone.status(), 404);
}

#[tokio::test]
async fn test_post_search_matches_title_or_content() {
    let _lock = lock_test();
    let client = reqwest::Client::new();

    let (token, _) = signup(&client, "searcher", "bvb").await;
    let marker = uuid::Uuid::new_v4().simple().to_string();
    create_post(&client, &token, &format!("Quantum {} Mechanics", marker)).await;

    let resp = client
        .get(format!("{}/api/posts?search={}", BASE_URL, marker.to_uppercase()))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let posts = resp.json::<serde_json::Value>().await.unwrap()["posts"]
        .as_array()
        .unwrap()
        .clone();
    assert_eq!(posts.len(), 1, "case-insensitive title match expected");

    let resp = client
        .get(format!("{}/api/posts?search=no_such_{}", BASE_URL, marker))
        .send()
        .await
        .unwrap();
    let posts = resp.json::<serde_json::Value>().await.unwrap()["posts"]
        .as_array()
        .unwrap()
        .clone();
    assert!(posts.is_empty());
}

#[tokio::test]
async fn test_post_requires_valid_type_and_auth() {
    let _lock = lock_test();
    let client = reqwest::Client::new();

    let (token, _) = signup(&client, "poster", "bvb").await;

    let bad_type = client
        .post(format!("{}/api/posts", BASE_URL))
        .bearer_auth(&token)
        .json(&json!({"type": "meme", "title": "t", "content": "c"}))
        .send()
        .await
        .unwrap();
    assert_eq!(bad_type.status(), 400);

    let no_auth = client
        .post(format!("{}/api/posts", BASE_URL))
        .json(&json!({"type": "notes", "title": "t", "content": "c"}))
        .send()
        .await
        .unwrap();
    assert_eq!(no_auth.status(), 401);

    // Partial attachment fields are rejected as a unit
    let partial_file = client
        .post(format!("{}/api/posts", BASE_URL))
        .bearer_auth(&token)
        .json(&json!({
            "type": "notes",
            "title": "t",
            "content": "c",
            "file_base64": "aGVsbG8=",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(partial_file.status(), 400);
}

#[tokio::test]
async fn test_like_toggle_round_trip() {
    let _lock = lock_test();
    let client = reqwest::Client::new();

    let (owner_token, _) = signup(&client, "author", "bvb").await;
    let (liker_token, liker_id) = signup(&client, "liker", "bvb").await;
    let post_id = create_post(&client, &owner_token, "Like me").await;

    let like = client
        .post(format!("{}/api/posts/{}/like", BASE_URL, post_id))
        .bearer_auth(&liker_token)
        .send()
        .await
        .unwrap();
    assert_eq!(like.status(), 200);
    let like_data = like.json::<serde_json::Value>().await.unwrap();
    assert_eq!(like_data["liked"], true);
    assert_eq!(like_data["likes"], 1);
    assert!(like_data["liked_by"]
        .as_array()
        .unwrap()
        .iter()
        .any(|v| v == &json!(liker_id)));

    let unlike = client
        .post(format!("{}/api/posts/{}/like", BASE_URL, post_id))
        .bearer_auth(&liker_token)
        .send()
        .await
        .unwrap();
    assert_eq!(unlike.status(), 200);
    let unlike_data = unlike.json::<serde_json::Value>().await.unwrap();
    assert_eq!(unlike_data["liked"], false);
    assert_eq!(unlike_data["likes"], 0);
    assert!(unlike_data["liked_by"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_comment_delete_permissions() {
    let _lock = lock_test();
    let client = reqwest::Client::new();

    let (owner_token, _) = signup(&client, "post_owner", "bvb").await;
    let (commenter_token, _) = signup(&client, "commenter", "bvb").await;
    let (stranger_token, _) = signup(&client, "stranger", "bvb").await;
    let post_id = create_post(&client, &owner_token, "Discuss").await;

    let comment = client
        .post(format!("{}/api/posts/{}/comments", BASE_URL, post_id))
        .bearer_auth(&commenter_token)
        .json(&json!({"content": "first!"}))
        .send()
        .await
        .unwrap();
    assert_eq!(comment.status(), 201);
    let comment_data = comment.json::<serde_json::Value>().await.unwrap();
    assert_eq!(comment_data["comments_count"], 1);
    let comment_id = comment_data["comments"][0]["id"].as_str().unwrap().to_string();

    // Neither comment author nor post owner
    let forbidden = client
        .delete(format!(
            "{}/api/posts/{}/comments/{}",
            BASE_URL, post_id, comment_id
        ))
        .bearer_auth(&stranger_token)
        .send()
        .await
        .unwrap();
    assert_eq!(forbidden.status(), 403);

    // The post owner may remove someone else's comment
    let removed = client
        .delete(format!(
            "{}/api/posts/{}/comments/{}",
            BASE_URL, post_id, comment_id
        ))
        .bearer_auth(&owner_token)
        .send()
        .await
        .unwrap();
    assert_eq!(removed.status(), 200);
    let removed_data = removed.json::<serde_json::Value>().await.unwrap();
    assert_eq!(removed_data["comments_count"], 0);
}

#[tokio::test]
async fn test_follow_then_refollow_conflicts() {
    let _lock = lock_test();
    let client = reqwest::Client::new();

    let (u1_token, _) = signup(&client, "follower", "bvb").await;
    let (_, u2_id) = signup(&client, "followed", "bvb").await;

    let follow = client
        .post(format!("{}/api/users/{}/follow", BASE_URL, u2_id))
        .bearer_auth(&u1_token)
        .send()
        .await
        .unwrap();
    assert_eq!(follow.status(), 200);
    let follow_data = follow.json::<serde_json::Value>().await.unwrap();
    assert_eq!(follow_data["followers_count"], 1);

    let again = client
        .post(format!("{}/api/users/{}/follow", BASE_URL, u2_id))
        .bearer_auth(&u1_token)
        .send()
        .await
        .unwrap();
    assert_eq!(again.status(), 409);

    let unfollow = client
        .post(format!("{}/api/users/{}/unfollow", BASE_URL, u2_id))
        .bearer_auth(&u1_token)
        .send()
        .await
        .unwrap();
    assert_eq!(unfollow.status(), 200);
    let unfollow_data = unfollow.json::<serde_json::Value>().await.unwrap();
    assert_eq!(unfollow_data["followers_count"], 0);

    let not_following = client
        .post(format!("{}/api/users/{}/unfollow", BASE_URL, u2_id))
        .bearer_auth(&u1_token)
        .send()
        .await
        .unwrap();
    assert_eq!(not_following.status(), 409);

    let self_follow_target = me(&client, &u1_token).await["id"].as_str().unwrap().to_string();
    let self_follow = client
        .post(format!("{}/api/users/{}/follow", BASE_URL, self_follow_target))
        .bearer_auth(&u1_token)
        .send()
        .await
        .unwrap();
    assert_eq!(self_follow.status(), 400);
}

#[tokio::test]
async fn test_note_crud_is_owner_scoped() {
    let _lock = lock_test();
    let client = reqwest::Client::new();

    let (owner_token, _) = signup(&client, "note_owner", "bvb").await;
    let (other_token, _) = signup(&client, "note_other", "bvb").await;

    let created = client
        .post(format!("{}/api/notes", BASE_URL))
        .bearer_auth(&owner_token)
        .json(&json!({
            "title": "Revision plan",
            "content": "chapters 1-4 by friday",
            "tags": ["Exams", "dsa"],
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(created.status(), 201);
    let note = created.json::<serde_json::Value>().await.unwrap()["note"].clone();
    let note_id = note["id"].as_str().unwrap().to_string();
    assert_eq!(note["tags"], json!(["exams", "dsa"]), "tags are lowercased");

    // The other user sees none of it and cannot touch it
    let listed = client
        .get(format!("{}/api/notes", BASE_URL))
        .bearer_auth(&other_token)
        .send()
        .await
        .unwrap();
    assert!(listed.json::<serde_json::Value>().await.unwrap()["notes"]
        .as_array()
        .unwrap()
        .is_empty());

    let forbidden = client
        .put(format!("{}/api/notes/{}", BASE_URL, note_id))
        .bearer_auth(&other_token)
        .json(&json!({"title": "hijacked"}))
        .send()
        .await
        .unwrap();
    assert_eq!(forbidden.status(), 403);

    let updated = client
        .put(format!("{}/api/notes/{}", BASE_URL, note_id))
        .bearer_auth(&owner_token)
        .json(&json!({"content": "chapters 1-6 by friday", "tags": []}))
        .send()
        .await
        .unwrap();
    assert_eq!(updated.status(), 200);
    let updated_note = updated.json::<serde_json::Value>().await.unwrap()["note"].clone();
    assert_eq!(updated_note["content"], "chapters 1-6 by friday");
    assert!(updated_note["tags"].as_array().unwrap().is_empty(), "tags cleared");

    let deleted = client
        .delete(format!("{}/api/notes/{}", BASE_URL, note_id))
        .bearer_auth(&owner_token)
        .send()
        .await
        .unwrap();
    assert_eq!(deleted.status(), 200);
}

#[tokio::test]
async fn test_deadline_visibility_union() {
    let _lock = lock_test();
    let client = reqwest::Client::new();

    // Fresh college names isolate this test from seeded data.
    let college_a = format!("college{}", uuid::Uuid::new_v4().simple());
    let college_b = format!("college{}", uuid::Uuid::new_v4().simple());

    let (u1_token, _) = signup(&client, "dl_owner", &college_a).await;
    let (u2_token, _) = signup(&client, "dl_peer", &college_a).await;
    let (u3_token, _) = signup(&client, "dl_outsider", &college_b).await;

    let make = |title: &str, public: bool| {
        json!({
            "title": title,
            "description": "",
            "due_date": "2026-12-01T09:00:00+00:00",
            "type": "exam",
            "is_public": public,
        })
    };

    for (title, public) in [("private exam", false), ("public exam", true)] {
        let resp = client
            .post(format!("{}/api/deadlines", BASE_URL))
            .bearer_auth(&u1_token)
            .json(&make(title, public))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 201);
    }

    let titles = |data: serde_json::Value| -> Vec<String> {
        data["deadlines"]
            .as_array()
            .unwrap()
            .iter()
            .map(|d| d["title"].as_str().unwrap().to_string())
            .collect()
    };

    // The owner sees both
    let own = client
        .get(format!("{}/api/deadlines", BASE_URL))
        .bearer_auth(&u1_token)
        .send()
        .await
        .unwrap();
    let own_titles = titles(own.json().await.unwrap());
    assert!(own_titles.contains(&"private exam".to_string()));
    assert!(own_titles.contains(&"public exam".to_string()));

    // A same-college peer sees only the public one
    let peer = client
        .get(format!("{}/api/deadlines", BASE_URL))
        .bearer_auth(&u2_token)
        .send()
        .await
        .unwrap();
    let peer_titles = titles(peer.json().await.unwrap());
    assert_eq!(peer_titles, vec!["public exam".to_string()]);

    // Another college sees nothing
    let outsider = client
        .get(format!("{}/api/deadlines", BASE_URL))
        .bearer_auth(&u3_token)
        .send()
        .await
        .unwrap();
    assert!(titles(outsider.json().await.unwrap()).is_empty());

    // mine=true hides the peer's view entirely
    let mine = client
        .get(format!("{}/api/deadlines?mine=true", BASE_URL))
        .bearer_auth(&u2_token)
        .send()
        .await
        .unwrap();
    assert!(titles(mine.json().await.unwrap()).is_empty());
}

#[tokio::test]
async fn test_deadline_ordering_soonest_due_first() {
    let _lock = lock_test();
    let client = reqwest::Client::new();

    let college = format!("college{}", uuid::Uuid::new_v4().simple());
    let (token, _) = signup(&client, "dl_sorter", &college).await;

    for (title, due) in [
        ("later", "2027-06-01T09:00:00+00:00"),
        ("sooner", "2026-11-01T09:00:00+00:00"),
    ] {
        let resp = client
            .post(format!("{}/api/deadlines", BASE_URL))
            .bearer_auth(&token)
            .json(&json!({
                "title": title,
                "due_date": due,
                "type": "assignment",
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 201);
    }

    let listed = client
        .get(format!("{}/api/deadlines", BASE_URL))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    let data = listed.json::<serde_json::Value>().await.unwrap();
    let titles: Vec<&str> = data["deadlines"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["sooner", "later"]);
}

#[tokio::test]
async fn test_group_membership_rules() {
    let _lock = lock_test();
    let client = reqwest::Client::new();

    let college = format!("college{}", uuid::Uuid::new_v4().simple());
    let (creator_token, creator_id) = signup(&client, "grp_creator", &college).await;
    let (member_token, _) = signup(&client, "grp_member", &college).await;

    let group_name = format!("algo-club-{}", uuid::Uuid::new_v4());
    let created = client
        .post(format!("{}/api/groups", BASE_URL))
        .bearer_auth(&creator_token)
        .json(&json!({"name": group_name, "description": "weekly practice"}))
        .send()
        .await
        .unwrap();
    assert_eq!(created.status(), 201);
    let group = created.json::<serde_json::Value>().await.unwrap()["group"].clone();
    let group_id = group["id"].as_str().unwrap().to_string();
    assert_eq!(group["members"], json!([creator_id]), "creator is a member at creation");

    // Duplicate name conflicts
    let dup = client
        .post(format!("{}/api/groups", BASE_URL))
        .bearer_auth(&member_token)
        .json(&json!({"name": group_name}))
        .send()
        .await
        .unwrap();
    assert_eq!(dup.status(), 409);

    // Sole-member creator cannot leave
    let sole_leave = client
        .post(format!("{}/api/groups/{}/leave", BASE_URL, group_id))
        .bearer_auth(&creator_token)
        .send()
        .await
        .unwrap();
    assert_eq!(sole_leave.status(), 400);

    let join = client
        .post(format!("{}/api/groups/{}/join", BASE_URL, group_id))
        .bearer_auth(&member_token)
        .send()
        .await
        .unwrap();
    assert_eq!(join.status(), 200);

    let rejoin = client
        .post(format!("{}/api/groups/{}/join", BASE_URL, group_id))
        .bearer_auth(&member_token)
        .send()
        .await
        .unwrap();
    assert_eq!(rejoin.status(), 409);

    // With another member present the creator may leave
    let leave = client
        .post(format!("{}/api/groups/{}/leave", BASE_URL, group_id))
        .bearer_auth(&creator_token)
        .send()
        .await
        .unwrap();
    assert_eq!(leave.status(), 200);

    // A non-creator cannot delete the group
    let forbidden_delete = client
        .delete(format!("{}/api/groups/{}", BASE_URL, group_id))
        .bearer_auth(&member_token)
        .send()
        .await
        .unwrap();
    assert_eq!(forbidden_delete.status(), 403);

    let deleted = client
        .delete(format!("{}/api/groups/{}", BASE_URL, group_id))
        .bearer_auth(&creator_token)
        .send()
        .await
        .unwrap();
    assert_eq!(deleted.status(), 200);
}

#[tokio::test]
async fn test_group_messages_member_scoped() {
    let _lock = lock_test();
    let client = reqwest::Client::new();

    let college = format!("college{}", uuid::Uuid::new_v4().simple());
    let (creator_token, _) = signup(&client, "msg_creator", &college).await;
    let (member_token, _) = signup(&client, "msg_member", &college).await;
    let (outsider_token, _) = signup(&client, "msg_outsider", &college).await;

    let created = client
        .post(format!("{}/api/groups", BASE_URL))
        .bearer_auth(&creator_token)
        .json(&json!({"name": format!("chat-{}", uuid::Uuid::new_v4())}))
        .send()
        .await
        .unwrap();
    let group_id = created.json::<serde_json::Value>().await.unwrap()["group"]["id"]
        .as_str()
        .unwrap()
        .to_string();

    client
        .post(format!("{}/api/groups/{}/join", BASE_URL, group_id))
        .bearer_auth(&member_token)
        .send()
        .await
        .unwrap();

    // Non-members can neither read nor write
    let outsider_read = client
        .get(format!("{}/api/groups/{}/messages", BASE_URL, group_id))
        .bearer_auth(&outsider_token)
        .send()
        .await
        .unwrap();
    assert_eq!(outsider_read.status(), 403);

    let outsider_write = client
        .post(format!("{}/api/groups/{}/messages", BASE_URL, group_id))
        .bearer_auth(&outsider_token)
        .json(&json!({"content": "let me in"}))
        .send()
        .await
        .unwrap();
    assert_eq!(outsider_write.status(), 403);

    let sent = client
        .post(format!("{}/api/groups/{}/messages", BASE_URL, group_id))
        .bearer_auth(&member_token)
        .json(&json!({"content": "anyone solved problem 3?"}))
        .send()
        .await
        .unwrap();
    assert_eq!(sent.status(), 201);
    let message_id = sent.json::<serde_json::Value>().await.unwrap()["messages"][0]["id"]
        .as_str()
        .unwrap()
        .to_string();

    // The group creator may delete another member's message
    let removed = client
        .delete(format!(
            "{}/api/groups/{}/messages/{}",
            BASE_URL, group_id, message_id
        ))
        .bearer_auth(&creator_token)
        .send()
        .await
        .unwrap();
    assert_eq!(removed.status(), 200);
    assert!(removed.json::<serde_json::Value>().await.unwrap()["messages"]
        .as_array()
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_user_search_reports_follow_status() {
    let _lock = lock_test();
    let client = reqwest::Client::new();

    let needle = uuid::Uuid::new_v4().simple().to_string();
    let (searcher_token, _) = signup(&client, "seeker", "bvb").await;
    let (_, target_id) = signup(&client, &format!("target_{}", needle), "bvb").await;

    client
        .post(format!("{}/api/users/{}/follow", BASE_URL, target_id))
        .bearer_auth(&searcher_token)
        .send()
        .await
        .unwrap();

    let found = client
        .get(format!("{}/api/users/search?query={}", BASE_URL, needle))
        .bearer_auth(&searcher_token)
        .send()
        .await
        .unwrap();
    assert_eq!(found.status(), 200);
    let users = found.json::<serde_json::Value>().await.unwrap()["users"]
        .as_array()
        .unwrap()
        .clone();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0]["id"], json!(target_id));
    assert_eq!(users[0]["is_following"], true);

    let missing_query = client
        .get(format!("{}/api/users/search", BASE_URL))
        .bearer_auth(&searcher_token)
        .send()
        .await
        .unwrap();
    assert_eq!(missing_query.status(), 400);
}

#[tokio::test]
async fn test_health_and_unknown_route() {
    let _lock = lock_test();
    let client = reqwest::Client::new();

    let health = client
        .get(format!("{}/api/health", BASE_URL))
        .send()
        .await
        .unwrap();
    assert_eq!(health.status(), 200);

    let unknown = client
        .get(format!("{}/api/nothing-here", BASE_URL))
        .send()
        .await
        .unwrap();
    assert_eq!(unknown.status(), 404);
}
