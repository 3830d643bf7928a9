//! Behavioral properties of the triage engine, checked over many inputs.

use chrono::{Duration, TimeZone, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use sense_shared::lifecycle;
use sense_shared::ranking;
use sense_shared::{
    classify, estimate_priority, suggest_response, Category, MemoryStore, Priority, ReplyGroup,
    ResponseSuggester, Ticket, TicketClassifier, TicketPatch, TicketStore,
};

const FILLERS: [&str; 5] = ["", "my app ", "Help! ", "please, the ", "URGENT "];
const CRASH_FORMS: [&str; 5] = ["crash", "CRASH", "Crashed", "crashing", "app-crash"];
const ACCESS_WORDS: [&str; 3] = ["password", "LOGIN", "Access"];

fn ticket(id: i64, priority: Priority, minutes: i64) -> Ticket {
    Ticket {
        id,
        text: format!("ticket {}", id),
        source: "web".to_string(),
        priority,
        category: Category::General,
        status: "new".to_string(),
        assigned_to: String::new(),
        customer_rating: 0,
        created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::minutes(minutes),
    }
}

#[test]
fn test_crash_is_bug_unless_access_word_present() {
    for filler in FILLERS {
        for crash in CRASH_FORMS {
            let text = format!("{}{} on startup", filler, crash);
            assert_eq!(classify(&text).category, Category::Bug, "{}", text);

            for access in ACCESS_WORDS {
                let text = format!("{}{} after {}", filler, crash, access);
                assert_eq!(classify(&text).category, Category::AccessIssue, "{}", text);
            }
        }
    }
}

#[test]
fn test_login_beats_broken() {
    for text in [
        "login broken",
        "BROKEN LOGIN",
        "the login page is broken and I want a refund",
        "broken: loginscreen",
    ] {
        assert_eq!(classify(text).category, Category::AccessIssue, "{}", text);
    }
}

#[test]
fn test_creation_and_analysis_rules_differ() {
    // "broken" is high on creation but not an urgency word for analysis
    let text = "the export is broken";
    assert_eq!(classify(text).priority, Priority::High);
    assert_eq!(estimate_priority(text).priority, Priority::Low);

    // a single anger word is not enough for analysis
    assert_eq!(estimate_priority("I am angry").priority, Priority::Low);
    assert_eq!(estimate_priority("angry and frustrated").priority, Priority::High);
}

#[test]
fn test_ranking_order_holds_for_shuffled_sets() {
    let priorities = [Priority::Low, Priority::High, Priority::Medium];
    let mut tickets: Vec<Ticket> = (0..30)
        .map(|i| ticket(i, priorities[(i as usize * 7) % 3], (i * 13) % 17))
        .collect();

    ranking::rank(&mut tickets);

    for pair in tickets.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        assert!(a.priority.rank() <= b.priority.rank());
        if a.priority == b.priority {
            assert!(a.created_at >= b.created_at);
        }
    }
}

#[test]
fn test_ranking_scenario() {
    let mut tickets = vec![
        ticket(1, Priority::Low, 1),
        ticket(2, Priority::High, 2),
        ticket(3, Priority::Medium, 3),
    ];
    ranking::rank(&mut tickets);
    let ids: Vec<i64> = tickets.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![2, 3, 1]);
}

#[test]
fn test_suggestion_membership() {
    let cases = [
        ("payment issue", ReplyGroup::Billing),
        ("The app is NOT WORKING", ReplyGroup::Troubleshooting),
        ("forgot my password", ReplyGroup::AccessRecovery),
        ("crash after login", ReplyGroup::Troubleshooting),
        ("hello there", ReplyGroup::Greeting),
        ("", ReplyGroup::Greeting),
    ];

    let suggester = ResponseSuggester::default();
    let mut rng = StdRng::seed_from_u64(7);
    for (text, group) in cases {
        assert_eq!(suggester.group_for(text), group);
        for _ in 0..20 {
            let reply = suggest_response(text, &mut rng);
            assert!(group.candidates().contains(&reply), "{} -> {}", text, reply);
        }
    }
}

#[test]
fn test_lifecycle_contract() {
    let store = MemoryStore::new();
    let classifier = TicketClassifier::default();
    let created = lifecycle::ingest(&store, &classifier, "refund please", Some("chat")).unwrap();

    // missing id: error, nothing changes
    let before = store.list().unwrap();
    let err = lifecycle::update(&store, created.id + 1, &TicketPatch::default().with_status("x"))
        .unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(store.list().unwrap(), before);

    // empty patch returns the current ticket
    let current = lifecycle::update(&store, created.id, &TicketPatch::default()).unwrap();
    assert_eq!(current, before[0]);

    // status update leaves the rest alone
    let resolved =
        lifecycle::update(&store, created.id, &TicketPatch::default().with_status("resolved"))
            .unwrap();
    assert_eq!(resolved.status, "resolved");
    assert_eq!(
        Ticket {
            status: current.status.clone(),
            ..resolved.clone()
        },
        current
    );

    // rating only
    let rated =
        lifecycle::update(&store, created.id, &TicketPatch::default().with_rating(4)).unwrap();
    assert_eq!(rated.customer_rating, 4);
    assert_eq!(rated.status, "resolved");
    assert_eq!(rated.assigned_to, "");
}

#[test]
fn test_round_trip_matches_classification() {
    let store = MemoryStore::new();
    let classifier = TicketClassifier::default();
    let texts = [
        "I'm really angry about login access broken",
        "This is a great feature suggestion",
        "billing problem",
        "",
        "Bug report: crashes immediately",
    ];

    for text in texts {
        lifecycle::ingest(&store, &classifier, text, None).unwrap();
    }

    let listed = lifecycle::list_ranked(&store).unwrap();
    assert_eq!(listed.len(), texts.len());
    for text in texts {
        let expected = classify(text);
        let entry = listed.iter().find(|t| t.text == text).unwrap();
        assert_eq!((entry.priority, entry.category), (expected.priority, expected.category));
    }
}
