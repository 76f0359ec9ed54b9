use companion_core::db::open_db_in_memory;
use companion_core::{
    sample_notes, CatalogRepository, ClassificationQuery, NoteMatcher, RepoError,
    SqliteCatalogRepository, StaticCatalog,
};

#[test]
fn sqlite_catalog_matches_static_catalog_behavior() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCatalogRepository::try_new(&conn).unwrap();
    assert_eq!(repo.insert_notes(sample_notes()).unwrap(), sample_notes().len());

    assert_eq!(repo.all().unwrap(), StaticCatalog::sample().all().unwrap());
    assert_eq!(
        repo.lookup("SCIENCE", 5).unwrap(),
        StaticCatalog::sample().lookup("Science", 5).unwrap()
    );

    let query = ClassificationQuery::new("math", 6).with_concepts(["Place Value"]);
    let from_sqlite = NoteMatcher::new(&repo).match_query(&query);
    let from_static = NoteMatcher::new(StaticCatalog::sample()).match_query(&query);
    assert_eq!(from_sqlite, from_static);
    assert_eq!(from_sqlite[0].id, "C6-MATH-01-01");
}

#[test]
fn insert_keeps_catalog_order_across_batches() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCatalogRepository::try_new(&conn).unwrap();

    let (head, tail) = sample_notes().split_at(3);
    repo.insert_notes(tail).unwrap();
    repo.insert_notes(head).unwrap();

    let ids: Vec<String> = repo.all().unwrap().into_iter().map(|note| note.id).collect();
    let expected: Vec<String> = tail
        .iter()
        .chain(head)
        .map(|note| note.id.clone())
        .collect();
    assert_eq!(ids, expected);
}

#[test]
fn duplicate_id_aborts_the_whole_batch() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCatalogRepository::try_new(&conn).unwrap();
    repo.insert_notes(&sample_notes()[..1]).unwrap();

    let err = repo.insert_notes(&sample_notes()[1..]).and_then(|_| {
        repo.insert_notes(&sample_notes()[..2])
    });
    assert!(matches!(err, Err(RepoError::DuplicateId(id)) if id == "C5-SCI-01-01"));
    assert_eq!(repo.all().unwrap().len(), sample_notes().len());
}

#[test]
fn corrupt_concepts_column_is_reported() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCatalogRepository::try_new(&conn).unwrap();
    conn.execute(
        "INSERT INTO curriculum_notes (id, position, subject, class_level, chapter, concepts, content)
         VALUES ('X-1', 0, 'Math', 6, 'Fractions', 'not-json', 'body');",
        [],
    )
    .unwrap();

    assert!(matches!(repo.lookup("Math", 6), Err(RepoError::InvalidData(_))));
    let query = ClassificationQuery::new("Math", 6).with_chapter("Fractions");
    assert!(NoteMatcher::new(&repo).match_query(&query).is_empty());
}
