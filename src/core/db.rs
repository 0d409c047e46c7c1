use spin_sdk::key_value::Store;
use uuid::Uuid;
use crate::models::models::{User, Post, PostKind};
use crate::core::helpers::{hash_password, now_iso};
use crate::config::*;

/// Seed deterministic demo data on an empty store. Safe to call on every
/// request; an already-seeded store is left untouched.
pub fn init_demo_data(store: &Store) -> anyhow::Result<()> {
    let users: Vec<String> = store.get_json(USERS_LIST_KEY)?.unwrap_or_default();

    let mut alice_id = String::new();
    let mut bob_id = String::new();

    for id in &users {
        if let Some(u) = store.get_json::<User>(&user_key(id))? {
            if u.email == "alice@bvb.edu" {
                alice_id = id.clone();
            }
            if u.email == "bob@kit.edu" {
                bob_id = id.clone();
            }
        }
    }

    if !alice_id.is_empty() && !bob_id.is_empty() {
        return Ok(()); // Already seeded
    }

    let mut users = users;
    let mut feed: Vec<String> = store.get_json(POSTS_FEED_KEY)?.unwrap_or_default();

    if alice_id.is_empty() {
        let user_id = Uuid::new_v4().to_string();
        let user = User {
            id: user_id.clone(),
            name: "Alice".to_string(),
            email: "alice@bvb.edu".to_string(),
            password: hash_password("alice123")?,
            course: "Computer Science".to_string(),
            college: "bvb".to_string(),
            post_count: 1,
            followers_count: 0,
            following: Vec::new(),
            created_at: now_iso(),
        };

        store.set_json(&user_key(&user_id), &user)?;
        users.push(user_id.clone());
        alice_id = user_id.clone();

        let post_id = Uuid::new_v4().to_string();
        let post = Post {
            id: post_id.clone(),
            user_id,
            kind: PostKind::Question,
            title: "Anyone up for a study session?".to_string(),
            content: "Looking for people to revise data structures with before finals."
                .to_string(),
            likes: 0,
            liked_by: Vec::new(),
            comments: Vec::new(),
            file: None,
            created_at: now_iso(),
        };

        store.set_json(&post_key(&post_id), &post)?;
        feed.insert(0, post_id);
    }

    if bob_id.is_empty() {
        let user_id = Uuid::new_v4().to_string();
        let user = User {
            id: user_id.clone(),
            name: "Bob".to_string(),
            email: "bob@kit.edu".to_string(),
            password: hash_password("bob123")?,
            course: "Mechanical Engineering".to_string(),
            college: "kit".to_string(),
            post_count: 0,
            followers_count: 0,
            following: Vec::new(),
            created_at: now_iso(),
        };

        store.set_json(&user_key(&user_id), &user)?;
        users.push(user_id.clone());
        bob_id = user_id;
    }

    // Alice follows Bob
    if let (Some(mut alice), Some(mut bob)) = (
        store.get_json::<User>(&user_key(&alice_id))?,
        store.get_json::<User>(&user_key(&bob_id))?,
    ) {
        if !alice.following.contains(&bob_id) {
            alice.following.insert(0, bob_id.clone());
            bob.followers_count += 1;
            store.set_json(&user_key(&alice_id), &alice)?;
            store.set_json(&user_key(&bob_id), &bob)?;
        }
    }

    store.set_json(USERS_LIST_KEY, &users)?;
    store.set_json(POSTS_FEED_KEY, &feed)?;

    Ok(())
}

/// Wipe every indexed document. Used by the integration suite between runs.
pub fn reset_db_data(store: &Store) -> anyhow::Result<()> {
    let users: Vec<String> = store.get_json(USERS_LIST_KEY)?.unwrap_or_default();

    for id in &users {
        let notes: Vec<String> = store.get_json(&user_notes_key(id))?.unwrap_or_default();
        for note_id in notes {
            store.delete(&note_key(&note_id))?;
        }
        store.delete(&user_notes_key(id))?;
        store.delete(&user_key(id))?;
    }

    let posts: Vec<String> = store.get_json(POSTS_FEED_KEY)?.unwrap_or_default();
    for id in posts {
        store.delete(&post_key(&id))?;
    }

    let deadlines: Vec<String> = store.get_json(DEADLINES_LIST_KEY)?.unwrap_or_default();
    for id in deadlines {
        store.delete(&deadline_key(&id))?;
    }

    let groups: Vec<String> = store.get_json(GROUPS_LIST_KEY)?.unwrap_or_default();
    for id in groups {
        store.delete(&group_key(&id))?;
    }

    let tokens: Vec<String> = store.get_json(TOKENS_LIST_KEY)?.unwrap_or_default();
    for token in tokens {
        store.delete(&token_key(&token))?;
    }

    store.delete(USERS_LIST_KEY)?;
    store.delete(POSTS_FEED_KEY)?;
    store.delete(DEADLINES_LIST_KEY)?;
    store.delete(GROUPS_LIST_KEY)?;
    store.delete(TOKENS_LIST_KEY)?;

    Ok(())
}
