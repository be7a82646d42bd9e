use crate::{
    allocate::{
        AllocationRow, Batch, MAX_BATCH_SIZE, allocate, batch::write_batch,
        reconcile,
    },
    error::Error,
    registration::parse_registration_code,
    resolve::{ResolutionMap, resolve},
    store::ParticipantStore,
    test::{adjudicators, categories, pairings, registrants, teams, venues},
    tournaments::{
        Participant, Team,
        rooms::{Venue, categories::UNCATEGORISED},
        rounds::{Room, briefing::briefings},
    },
    zoom::Registrant,
};

fn emails(rows: &[AllocationRow]) -> Vec<&str> {
    rows.iter().map(|row| row.email.as_str()).collect()
}

#[test]
fn fixtures_parse() {
    let teams = teams();
    assert_eq!(teams.len(), 4);
    assert_eq!(teams[3].emoji, "");
    assert_eq!(teams[3].speakers[1].email, "");
    assert_eq!(teams[0].speakers[0].barcode.as_deref(), Some("100001"));

    let rooms = pairings();
    assert_eq!(rooms[0].side_names, vec!["OG", "OO", "CG", "CO"]);
    assert_eq!(rooms[1].chair_id, Some(23));

    assert_eq!(registrants().len(), 13);
    assert_eq!(categories().len(), 1);
}

#[test]
fn resolves_registrants() {
    let map = resolve(&registrants(), &teams(), &adjudicators());

    assert_eq!(
        map.teams[&7u64],
        vec!["j.doe@x.com", "ali.personal@gmail.com"]
    );
    assert_eq!(map.teams[&8u64], vec!["BEA@uni.edu", "cal@uni.edu"]);
    assert_eq!(map.teams[&10u64], vec!["fay@uni.edu"]);
    assert_eq!(
        map.teams.keys().copied().collect::<Vec<_>>(),
        vec![7, 8, 9, 10]
    );

    assert_eq!(map.judges[&22u64], "kim.lo@home.net");
    assert_eq!(map.judges[&23u64], "lee@mo.org");

    let unknown = map
        .unknown
        .iter()
        .map(|r| r.name.as_str())
        .collect::<Vec<_>>();
    assert_eq!(unknown, vec!["Zed Quinn", "Observer"]);
}

#[test]
fn jane_doe_resolves_to_her_team() {
    let registrants = vec![Registrant::new("j.doe@x.com", "Jane Doe")];
    let teams = vec![Team {
        id: 7,
        emoji: String::new(),
        speakers: vec![Participant::speaker(1, "Someone", "j.doe@x.com")],
    }];

    let map = resolve(&registrants, &teams, &[]);

    assert_eq!(map.teams[&7u64], vec!["j.doe@x.com"]);
    assert!(map.unknown.is_empty());
}

#[test]
fn unknown_registrants_get_no_room() {
    let map = resolve(&registrants(), &teams(), &adjudicators());
    let allocations =
        allocate(map.clone(), &venues(), &pairings(), &categories()).unwrap();

    for allocation in &allocations {
        for unknown in &map.unknown {
            assert!(
                allocation.rows.iter().all(|row| row.email != unknown.email)
            );
        }
    }
}

#[test]
fn allocates_resolved_round() {
    let map = resolve(&registrants(), &teams(), &adjudicators());
    let allocations =
        allocate(map, &venues(), &pairings(), &categories()).unwrap();

    assert_eq!(allocations.len(), 2);

    let debates = &allocations[0];
    assert_eq!(debates.category.name, "debates");
    assert!(debates.rows.iter().all(|row| row.venue == "Debate Room 3A"));
    assert_eq!(
        emails(&debates.rows),
        vec![
            "j.doe@x.com",
            "ali.personal@gmail.com",
            "BEA@uni.edu",
            "cal@uni.edu",
            "dee@uni.edu",
            "eli@uni.edu",
            "fay@uni.edu",
            "hana@uni.edu",
            "ivo@uni.edu",
            "kim.lo@home.net",
        ]
    );

    // `Social Room` matches no category.
    let rest = &allocations[1];
    assert!(rest.category.is_uncategorised());
    assert_eq!(
        rest.rows,
        vec![AllocationRow::new("Social Room", "lee@mo.org")]
    );

    let mut csv = Vec::new();
    let leftover = write_batch(debates, &mut csv).unwrap();
    assert!(leftover.is_empty());
    let csv = String::from_utf8(csv).unwrap();
    assert_eq!(csv.lines().count(), 11);
    assert_eq!(csv.lines().nth(1), Some("Debate Room 3A,j.doe@x.com"));
}

#[test]
fn classifies_venues() {
    let categories = categories();
    assert_eq!(categories.classify("Debate Room 3A").unwrap(), Some(0));
    assert!(matches!(
        categories.classify("Social Room"),
        Err(Error::CategoryNotFound { .. })
    ));
    assert_eq!(categories.lookup("Debate Room 3A").unwrap().name, "debates");
}

#[test]
fn allocates_from_the_store() {
    let mut store = ParticipantStore::in_memory().unwrap();
    store.add_teams(&teams()).unwrap();
    store.add_adjudicators(&adjudicators()).unwrap();

    let allocations =
        allocate(&mut store, &venues(), &pairings(), &categories()).unwrap();

    assert_eq!(
        emails(&allocations[0].rows),
        vec![
            "j.doe@x.com",
            "ali@uni.edu",
            "bea@uni.edu",
            "cal@uni.edu",
            "dee@uni.edu",
            "eli@uni.edu",
            "fay@uni.edu",
            "hana@uni.edu",
            "ivo@uni.edu",
            "kim@uni.edu",
        ]
    );
    // Lee Mo signed up without an email.
    assert!(allocations[1].is_empty());
}

#[test]
fn registration_binds_and_briefs() {
    let mut store = ParticipantStore::in_memory().unwrap();
    store.add_teams(&teams()).unwrap();
    store.add_adjudicators(&adjudicators()).unwrap();

    let code = parse_registration_code("!Register 100001").unwrap();
    let jane = store.bind_chat_identity(&code, "chat-jane").unwrap();
    assert_eq!(jane.id, 1);
    assert_eq!(jane.label, "[🦊] Jane Doe");

    let code = parse_registration_code("200020").unwrap();
    let hana = store.bind_chat_identity(&code, "chat-hana").unwrap();
    assert_eq!(hana.label, "[J] Hana Ito");

    assert!(matches!(
        store.bind_chat_identity("100001", "chat-other"),
        Err(Error::NotBindable { .. })
    ));

    let out = briefings(&venues(), &pairings(), &categories());
    assert_eq!(out.len(), 8);
    assert!(out[0].message.contains("**Opening Government**"));
    assert!(out[0].message.ends_with("https://meet.example.com/j/333."));
    assert!(!out[7].message.contains("link"));

    assert_eq!(store.chat_ids_for_team(7).unwrap(), vec!["chat-jane"]);
    assert_eq!(
        store.chat_ids_for_participants(&[20, 21]).unwrap(),
        vec!["chat-hana"]
    );
}

/// 125 two-speaker teams, one team per room, all in one category.
fn large_round() -> (Vec<Team>, Vec<Venue>, Vec<Room>) {
    let teams = (0..125u64)
        .map(|t| Team {
            id: t,
            emoji: String::new(),
            speakers: (0..2)
                .map(|s| {
                    let id = t * 2 + s;
                    Participant::speaker(
                        id,
                        format!("Speaker {id}"),
                        format!("s{id}@uni.edu"),
                    )
                })
                .collect(),
        })
        .collect::<Vec<_>>();
    let venues = (0..125u64)
        .map(|v| Venue {
            id: v,
            name: format!("Debate Room 3-{v}"),
        })
        .collect();
    let rooms = (0..125u64)
        .map(|r| Room {
            venue_id: r,
            chair_id: None,
            panellist_ids: vec![],
            trainee_ids: vec![],
            team_ids: vec![r],
            side_names: vec!["GOV".to_string()],
        })
        .collect();
    (teams, venues, rooms)
}

#[test]
fn overflow_is_reconciled_against_the_store() {
    let (teams, venues, rooms) = large_round();
    let map = ResolutionMap::from_roster(&teams, &[]);
    let allocations = allocate(map, &venues, &rooms, &categories()).unwrap();

    let debates = &allocations[0];
    assert_eq!(debates.len(), 250);

    let batch = Batch::split(&debates.rows, MAX_BATCH_SIZE);
    assert_eq!(batch.rows.len(), 200);
    assert_eq!(batch.leftover.len(), 50);
    let csv = String::from_utf8(batch.to_csv().unwrap()).unwrap();
    assert_eq!(csv.lines().count(), 201);

    // The last team never made it into the store.
    let mut store = ParticipantStore::in_memory().unwrap();
    store.add_teams(&teams[..124]).unwrap();

    let report = reconcile(batch.leftover, &mut store);
    assert_eq!(report.len(), 50);
    assert_eq!(report[0].name, "Speaker 200");
    assert_eq!(report[0].venue, "Debate Room 3-100");
    let echoed = report
        .iter()
        .filter(|row| row.name.contains('@'))
        .map(|row| row.name.as_str())
        .collect::<Vec<_>>();
    assert_eq!(echoed, vec!["s248@uni.edu", "s249@uni.edu"]);

    assert!(allocations[1].category == UNCATEGORISED);
    assert!(allocations[1].is_empty());
}
