use mentor_core::mentor::{classify, simulate_reply};
use mentor_core::*;
use tempfile::TempDir;

// ========================================================================
// Conversation Store Tests (context/persistence.rs)
// ========================================================================

fn memory_store() -> ConversationStore {
    ConversationStore::open(MemoryStore::new())
}

#[test]
fn test_commit_then_load_round_trip_is_independent() {
    let mut store = memory_store();
    store.append_message(Role::User, "How do I raise a seed round?").unwrap();
    store.append_message(Role::Assistant, "Start with traction.").unwrap();
    store.commit_current_to_saved_list().unwrap();
    let committed = store.current().clone();

    store.create_conversation(Some("Other")).unwrap();
    let loaded = store.load_from_saved(&committed.id).unwrap().unwrap();
    assert_eq!(loaded, committed);

    // Editing the reloaded copy must not touch the saved entry.
    store.append_message(Role::User, "follow-up").unwrap();
    assert_eq!(store.current().messages.len(), 3);
    assert_eq!(store.saved()[0].messages.len(), 2);
    assert_eq!(store.saved()[0], committed);
}

#[test]
fn test_edits_after_commit_do_not_alter_saved_copy() {
    let mut store = memory_store();
    store.append_message(Role::User, "one").unwrap();
    store.commit_current_to_saved_list().unwrap();

    store.append_message(Role::User, "two").unwrap();
    store.clear_current().unwrap();

    assert_eq!(store.saved()[0].messages.len(), 1);
    assert_eq!(store.saved()[0].messages[0].text, "one");
}

#[test]
fn test_cap_keeps_fifty_most_recent_first() {
    let mut store = memory_store();
    let mut ids = Vec::new();
    for i in 0..51 {
        let conv = store.create_conversation(Some(&format!("chat {i}"))).unwrap();
        store.commit_current_to_saved_list().unwrap();
        ids.push(conv.id);
    }

    assert_eq!(store.saved().len(), 50);
    assert_eq!(store.saved()[0].id, ids[50]);
    assert_eq!(store.saved()[49].id, ids[1]);
    assert!(store.saved().iter().all(|c| c.id != ids[0]));
}

#[test]
fn test_full_list_drops_oldest_on_new_commit() {
    let mut store = memory_store();
    for i in 0..50 {
        store.create_conversation(Some(&format!("chat {i}"))).unwrap();
        store.commit_current_to_saved_list().unwrap();
    }
    let oldest = store.saved()[49].id.clone();
    let second_oldest = store.saved()[48].id.clone();

    let newest = store.create_conversation(Some("newest")).unwrap();
    store.commit_current_to_saved_list().unwrap();

    assert_eq!(store.saved().len(), 50);
    assert_eq!(store.saved()[0].id, newest.id);
    assert_eq!(store.saved()[49].id, second_oldest);
    assert!(store.saved().iter().all(|c| c.id != oldest));
}

#[test]
fn test_clear_resets_messages_and_name() {
    let mut store = memory_store();
    store.create_conversation(Some("Board prep")).unwrap();
    store.append_message(Role::User, "a").unwrap();
    store.append_message(Role::Assistant, "b").unwrap();
    let id = store.current().id.clone();

    store.clear_current().unwrap();

    assert!(store.current().messages.is_empty());
    assert_eq!(store.current().name, "Untitled");
    assert_eq!(store.current().id, id);
    assert!(store.saved().is_empty());
}

#[test]
fn test_load_unknown_id_is_a_no_op() {
    let mut store = memory_store();
    store.append_message(Role::User, "keep me").unwrap();
    let before = store.current().clone();

    assert!(store.load_from_saved("c_missing").unwrap().is_none());
    assert_eq!(store.current(), &before);
}

#[test]
fn test_recent_is_bounded() {
    let mut store = memory_store();
    assert!(store.recent(5).is_empty());
    for _ in 0..7 {
        store.create_conversation(None).unwrap();
        store.commit_current_to_saved_list().unwrap();
    }
    assert_eq!(store.recent(5).len(), 5);
    assert_eq!(store.recent(5)[0].id, store.current().id);
}

#[test]
fn test_file_store_persists_across_reopen() {
    let temp_dir = TempDir::new().unwrap();

    let (current_id, saved_id) = {
        let mut store = ConversationStore::open(FileStore::with_dir(temp_dir.path()).unwrap());
        store.append_message(Role::User, "saved question").unwrap();
        store.commit_current_as(Some("Saved one")).unwrap();
        let saved_id = store.current().id.clone();

        store.create_conversation(None).unwrap();
        store.append_message(Role::User, "draft").unwrap();
        store
            .save_profile(Profile {
                fullname: "Ada Lovelace".into(),
                stage: "Seed".into(),
                ..Default::default()
            })
            .unwrap();
        store.set_style(MentorStyle::Investor).unwrap();
        (store.current().id.clone(), saved_id)
    };

    let store = ConversationStore::open(FileStore::with_dir(temp_dir.path()).unwrap());
    assert_eq!(store.current().id, current_id);
    assert_eq!(store.current().messages[0].text, "draft");
    assert_eq!(store.saved().len(), 1);
    assert_eq!(store.saved()[0].id, saved_id);
    assert_eq!(store.saved()[0].name, "Saved one");
    assert_eq!(store.profile().stage, "Seed");
    assert_eq!(store.style(), MentorStyle::Investor);

    let style_raw = std::fs::read_to_string(temp_dir.path().join("smp_style_v1.json")).unwrap();
    assert_eq!(style_raw, "investor");
}

#[test]
fn test_corrupt_file_resets_only_that_record() {
    let temp_dir = TempDir::new().unwrap();
    {
        let mut store = ConversationStore::open(FileStore::with_dir(temp_dir.path()).unwrap());
        store.append_message(Role::User, "survivor").unwrap();
        store.commit_current_to_saved_list().unwrap();
    }
    std::fs::write(temp_dir.path().join("smp_chats_v1.json"), "{{{").unwrap();

    let store = ConversationStore::open(FileStore::with_dir(temp_dir.path()).unwrap());
    assert!(store.saved().is_empty());
    assert_eq!(store.current().messages[0].text, "survivor");
}

// ========================================================================
// Reply Generator Tests (mentor/)
// ========================================================================

fn sample_profiles() -> Vec<Profile> {
    vec![
        Profile::default(),
        Profile {
            fullname: "Grace Hopper".into(),
            startup: "Cobol Co".into(),
            stage: "Series A".into(),
            ..Default::default()
        },
        Profile {
            startup: "Acme".into(),
            ..Default::default()
        },
    ]
}

#[tokio::test]
async fn test_generate_reply_is_never_empty() {
    let generator = ReplyGenerator::offline().with_latency(false);
    let inputs = ["", "raise", "marketing", "nda", "hiring", "pricing", "deck", "hmm?"];

    for profile in sample_profiles() {
        for style in MentorStyle::ALL {
            for input in inputs {
                let reply = generator.generate_reply(input, &[], &profile, style).await;
                assert!(!reply.trim().is_empty(), "{input} / {style}");
            }
        }
    }
}

#[tokio::test]
async fn test_local_selection_is_deterministic() {
    let generator = ReplyGenerator::offline().with_latency(false);
    let history = vec![Message::user("earlier"), Message::assistant("reply")];
    let profile = Profile::default();

    let first = generator
        .generate_reply("How should we approach pricing?", &history, &profile, MentorStyle::Balanced)
        .await;
    for _ in 0..5 {
        let again = generator
            .generate_reply("How should we approach pricing?", &history, &profile, MentorStyle::Balanced)
            .await;
        assert_eq!(again, first);
    }
}

#[test]
fn test_funding_keyword_beats_marketing() {
    let text = "I need help with fundraising and also marketing growth";
    assert_eq!(classify(&text.to_lowercase()), Some(Intent::Funding));

    let reply = simulate_reply(text, &Profile::default(), MentorStyle::Balanced);
    assert_eq!(reply.intent, Some(Intent::Funding));
}

#[tokio::test]
async fn test_scenario_raise_with_direct_style() {
    let mut store = ConversationStore::open(MemoryStore::new());
    store.set_style(MentorStyle::Direct).unwrap();
    let generator = ReplyGenerator::offline().with_latency(false);
    let mut session = MentorSession::new(store, Box::new(generator));

    let reply = session.send("raise").await.unwrap().unwrap();

    assert_eq!(reply.role, Role::Assistant);
    assert!(reply.text.starts_with("Here’s a concise plan:"));
    assert!(reply.text.contains("1) One-sentence value prop\n2) Top metric to improve"));
    assert!(!reply.text.contains("- Write a one-line value proposition"));
    assert!(reply.text.contains(
        "Follow-up: Do you have any traction metrics (revenue, users) I can use to draft a short pitch?"
    ));

    let current = session.store().current();
    assert_eq!(current.name, "Untitled");
    assert_eq!(current.messages.len(), 2);
    assert_eq!(current.messages[0].text, "raise");
}
