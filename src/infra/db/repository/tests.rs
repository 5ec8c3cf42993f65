use crate::domain::Favorite;
use crate::infra::db::Database;
use crate::infra::db::repository::*;
use anyhow::Result;

// Letters chosen deliberately: "kennedy" only matches JFK's name,
// "international" matches both, "q" matches neither.
const TEST_SEED: &str = "\
JFK,John F. Kennedy International Airport,62551072
LGA,LaGuardia Airport,31084894
SXF,Berlin International Airport,62551072
";

#[test]
fn test_search_filters_and_ranks() -> Result<()> {
    let db = Database::open_in_memory_with(TEST_SEED)?;
    let repo = AirportRepository::new(db.connection());

    let hits = repo.search("kennedy")?;
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].iata_code, "JFK");

    // Matches on code as well as name, case-insensitive.
    let hits = repo.search("lga")?;
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].iata_code, "LGA");

    let hits = repo.search("q")?;
    assert!(hits.is_empty());

    // Every result actually contains the substring.
    let hits = repo.search("international")?;
    assert_eq!(hits.len(), 2);
    for airport in &hits {
        assert!(airport.matches("international"));
    }
    Ok(())
}

#[test]
fn test_search_tie_break_is_ascending_id() -> Result<()> {
    let db = Database::open_in_memory_with(TEST_SEED)?;
    let repo = AirportRepository::new(db.connection());

    // JFK and SXF share a passenger count; JFK was seeded first.
    let hits = repo.search("international")?;
    assert_eq!(hits[0].iata_code, "JFK");
    assert_eq!(hits[1].iata_code, "SXF");
    assert!(hits[0].id < hits[1].id);
    Ok(())
}

#[test]
fn test_list_all_ordered_by_volume() -> Result<()> {
    let db = Database::open_in_memory_with(TEST_SEED)?;
    let repo = AirportRepository::new(db.connection());

    let all = repo.list_all()?;
    assert_eq!(all.len(), 3);
    for pair in all.windows(2) {
        assert!(pair[0].passengers >= pair[1].passengers);
    }
    Ok(())
}

#[test]
fn test_bundled_seed_loads() -> Result<()> {
    let db = Database::open_in_memory()?;
    let repo = AirportRepository::new(db.connection());
    let all = repo.list_all()?;
    assert!(!all.is_empty());
    for airport in &all {
        assert!(!airport.iata_code.is_empty());
        assert!(airport.passengers >= 0);
    }
    Ok(())
}

#[test]
fn test_seed_skips_invalid_rows() -> Result<()> {
    let seed = "\
JFK,John F. Kennedy International Airport,62551072
,Nameless Airport,100
BAD,Bad Count Airport,-5
XXX,Not A Number,abc
LGA,LaGuardia Airport,31084894
";
    let db = Database::open_in_memory_with(seed)?;
    let repo = AirportRepository::new(db.connection());
    let all = repo.list_all()?;
    assert_eq!(all.len(), 2);
    Ok(())
}

#[test]
fn test_favorite_insert_is_upsert_by_id() -> Result<()> {
    let db = Database::open_in_memory_with(TEST_SEED)?;
    let repo = FavoriteRepository::new(db.connection());

    repo.insert(&Favorite::new(1, "JFK", "LGA"))?;
    repo.insert(&Favorite::new(1, "LGA", "SXF"))?;

    let all = repo.list_all()?;
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].departure_code, "LGA");
    assert_eq!(all[0].destination_code, "SXF");
    Ok(())
}

#[test]
fn test_favorite_delete_missing_is_noop() -> Result<()> {
    let db = Database::open_in_memory_with(TEST_SEED)?;
    let repo = FavoriteRepository::new(db.connection());

    repo.insert(&Favorite::new(1, "JFK", "LGA"))?;
    let affected = repo.delete(42)?;
    assert_eq!(affected, 0);
    assert_eq!(repo.list_all()?.len(), 1);
    Ok(())
}

#[test]
fn test_favorites_listed_in_id_order() -> Result<()> {
    let db = Database::open_in_memory_with(TEST_SEED)?;
    let repo = FavoriteRepository::new(db.connection());

    repo.insert(&Favorite::new(3, "JFK", "LGA"))?;
    repo.insert(&Favorite::new(1, "LGA", "JFK"))?;
    repo.insert(&Favorite::new(2, "SXF", "JFK"))?;

    let ids: Vec<_> = repo.list_all()?.into_iter().map(|f| f.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
    Ok(())
}
