use pretty_assertions::assert_eq;
use tests::prelude::*;

async fn create_then_fetch_round_trips(test: &mut DbTest) {
    let db = test.setup_db(models!(Person)).await;
    let people = db.collection::<Person>().unwrap();

    let person = people
        .create(fields! { "name" => " Sami ", "age" => "29" })
        .await
        .unwrap();

    assert_eq!(RecordState::Persisted, person.state());
    assert_eq!(0, person.dirty_fields().count());

    let id = assert_some!(person.id()).to_string();
    let fetched = assert_some!(people.fetch(&id).await.unwrap());

    assert_eq!(Some("Sami"), fetched.get_str("name"));
    assert_eq!(Some(29), fetched.get_i64("age"));
    assert!(!fetched.is("verified"));
    assert_eq!(person.values(), fetched.values());
}

async fn create_assigns_uuid_ids(test: &mut DbTest) {
    let db = test.setup_db(models!(Person)).await;
    let people = db.collection::<Person>().unwrap();

    let a = people.create(fields! { "name" => "A", "age" => 20 }).await.unwrap();
    let b = people.create(fields! { "name" => "B", "age" => 21 }).await.unwrap();

    let a = assert_some!(a.id());
    let b = assert_some!(b.id());
    assert_ne!(a, b);
    assert_eq!(36, a.len());

    assert_eq!(2, people.count().await.unwrap());
    let mut expected = vec![a.to_string(), b.to_string()];
    expected.sort();
    assert_eq!(expected, people.list_ids().await.unwrap());
}

async fn explicit_id_is_kept_and_reuse_is_a_duplicate(test: &mut DbTest) {
    let db = test.setup_db(models!(Person)).await;
    let people = db.collection::<Person>().unwrap();

    let person = people
        .create(fields! { "id" => "sami", "name" => "Sami", "age" => 29 })
        .await
        .unwrap();
    assert_eq!(Some("sami"), person.id());

    let err = assert_err!(
        people
            .create(fields! { "id" => "sami", "name" => "Other", "age" => 40 })
            .await
    );
    assert!(err.is_duplicate_field());
    assert_eq!(Some(("id", "sami")), err.duplicated_field());
    assert_eq!(1, people.count().await.unwrap());
}

async fn update_validates_while_update_all_does_not(test: &mut DbTest) {
    let db = test.setup_db(models!(Person)).await;
    let people = db.collection::<Person>().unwrap();

    let mut person = people
        .create(fields! { "name" => "Sami", "age" => "29" })
        .await
        .unwrap();
    let id = person.id().unwrap().to_string();

    let err = assert_err!(db.update(&mut person, fields! { "age" => 14 }).await);
    assert_eq!(
        Some(&Reason::Invalid),
        err.invalid_fields().unwrap().get("age")
    );

    let err = assert_err!(db.update(&mut person, fields! { "age" => -5 }).await);
    assert!(err.is_invalid_data());
    assert_eq!(
        Some(&Reason::Missing),
        err.invalid_fields().unwrap().get("age")
    );

    // A failed update leaves the record as it was
    assert_eq!(Some(29), person.get_i64("age"));
    assert_eq!(0, person.dirty_fields().count());

    db.update_all(&mut person, fields! { "age" => -5, "verified" => true })
        .await
        .unwrap();
    assert_eq!(Some(-5), person.get_i64("age"));

    let fetched = people.fetch(&id).await.unwrap().unwrap();
    assert_eq!(Some(-5), fetched.get_i64("age"));
    assert!(fetched.is("verified"));
}

async fn update_skips_fields_that_are_not_updatable(test: &mut DbTest) {
    let db = test.setup_db(models!(Person)).await;
    let people = db.collection::<Person>().unwrap();

    let mut person = people
        .create(fields! { "name" => "Sami", "age" => 29 })
        .await
        .unwrap();

    db.update(&mut person, fields! { "name" => "Samira", "verified" => true })
        .await
        .unwrap();

    let fetched = people.fetch(person.id().unwrap()).await.unwrap().unwrap();
    assert_eq!(Some("Samira"), fetched.get_str("name"));
    assert!(!fetched.is("verified"));
}

async fn unknown_fields_are_rejected(test: &mut DbTest) {
    let db = test.setup_db(models!(Person)).await;
    let people = db.collection::<Person>().unwrap();

    let err = assert_err!(
        people
            .create(fields! { "name" => "Sami", "age" => 29, "nickname" => "S" })
            .await
    );
    assert!(err.is_unknown_field());
    assert_eq!(0, people.count().await.unwrap());

    let mut person = people
        .create(fields! { "name" => "Sami", "age" => 29 })
        .await
        .unwrap();
    let err = assert_err!(db.update(&mut person, fields! { "nickname" => "S" }).await);
    assert!(err.is_unknown_field());
}

async fn failed_create_writes_nothing(test: &mut DbTest) {
    let db = test.setup_db(models!(Person)).await;
    let people = db.collection::<Person>().unwrap();

    test.log().clear();

    let err = assert_err!(people.create(fields! { "name" => " ", "age" => 29 }).await);
    assert_eq!(
        Some(&Reason::Missing),
        err.invalid_fields().unwrap().get("name")
    );

    assert_eq!(0, test.log().writes());
    assert_eq!(0, people.count().await.unwrap());
}

async fn save_writes_only_dirty_fields(test: &mut DbTest) {
    let db = test.setup_db(models!(Person)).await;
    let people = db.collection::<Person>().unwrap();

    let mut person = people
        .create(fields! { "name" => "Sami", "age" => 29 })
        .await
        .unwrap();

    person.set("name", "Samira").unwrap();
    assert_eq!(vec!["name"], person.dirty_fields().collect::<Vec<_>>());

    test.log().clear();
    db.save(&mut person).await.unwrap();

    let ops = test.log().operations();
    let pairs = ops
        .iter()
        .find_map(|op| match op {
            Operation::HashSet(op) => Some(op.pairs.clone()),
            _ => None,
        })
        .unwrap();
    assert_eq!(vec![("name".to_string(), "Samira".to_string())], pairs);
    assert_eq!(0, person.dirty_fields().count());
}

async fn save_with_nothing_dirty_writes_nothing(test: &mut DbTest) {
    let db = test.setup_db(models!(Person)).await;
    let people = db.collection::<Person>().unwrap();

    let mut person = people
        .create(fields! { "name" => "Sami", "age" => 29 })
        .await
        .unwrap();

    // Setting a field back to its stored value leaves it clean
    person.set("age", "29").unwrap();

    test.log().clear();
    db.save(&mut person).await.unwrap();

    assert_eq!(0, test.log().writes());
}

async fn save_unchecked_skips_validation(test: &mut DbTest) {
    let db = test.setup_db(models!(Person)).await;
    let people = db.collection::<Person>().unwrap();

    let mut person = people
        .create(fields! { "name" => "Sami", "age" => 29 })
        .await
        .unwrap();

    person.set("age", 3).unwrap();
    assert!(assert_err!(db.save(&mut person).await).is_invalid_data());
    assert!(person.is_dirty("age"));

    db.save_unchecked(&mut person).await.unwrap();
    let fetched = people.fetch(person.id().unwrap()).await.unwrap().unwrap();
    assert_eq!(Some(3), fetched.get_i64("age"));
}

async fn reload_discards_unsaved_changes(test: &mut DbTest) {
    let db = test.setup_db(models!(Person)).await;
    let people = db.collection::<Person>().unwrap();

    let mut person = people
        .create(fields! { "name" => "Sami", "age" => 29 })
        .await
        .unwrap();

    person.set("name", "Unsaved").unwrap();
    db.reload(&mut person).await.unwrap();

    assert_eq!(Some("Sami"), person.get_str("name"));
    assert_eq!(0, person.dirty_fields().count());
}

async fn reload_of_a_deleted_id_is_not_found(test: &mut DbTest) {
    let db = test.setup_db(models!(Person)).await;
    let people = db.collection::<Person>().unwrap();

    let mut person = people
        .create(fields! { "id" => "p1", "name" => "Sami", "age" => 29 })
        .await
        .unwrap();

    people.delete("p1").await.unwrap();

    let err = assert_err!(db.reload(&mut person).await);
    assert!(err.is_record_not_found());
    assert_eq!("record not found: person:p1", err.to_string());
}

async fn record_states_guard_operations(test: &mut DbTest) {
    let db = test.setup_db(models!(Person)).await;
    let people = db.collection::<Person>().unwrap();

    let mut draft = people.build(fields! { "name" => "Sami", "age" => 29 }).unwrap();
    assert_eq!(RecordState::Unpersisted, draft.state());
    assert!(assert_err!(db.save(&mut draft).await).is_invalid_state());
    assert!(assert_err!(db.reload(&mut draft).await).is_invalid_state());
    assert!(assert_err!(db.delete(&mut draft).await).is_invalid_state());

    people.insert(&mut draft).await.unwrap();
    assert!(assert_err!(people.insert(&mut draft).await).is_invalid_state());

    draft.set("id", "another").unwrap();
    assert!(assert_err!(db.save(&mut draft).await).is_invalid_state());
    db.reload(&mut draft).await.unwrap();

    db.delete(&mut draft).await.unwrap();
    assert_eq!(RecordState::Deleted, draft.state());
    assert!(assert_err!(db.save(&mut draft).await).is_invalid_state());
    assert!(assert_err!(db.update(&mut draft, fields! { "name" => "X" }).await).is_invalid_state());

    // Deleting twice is a no-op
    db.delete(&mut draft).await.unwrap();
}

async fn delete_of_a_missing_id_is_a_no_op(test: &mut DbTest) {
    let db = test.setup_db(models!(Person)).await;
    let people = db.collection::<Person>().unwrap();

    people.create(fields! { "name" => "Sami", "age" => 29 }).await.unwrap();

    people.delete("nope").await.unwrap();
    assert_eq!(1, people.count().await.unwrap());
    assert!(!people.exists("nope").await.unwrap());
    assert_none!(people.fetch("nope").await.unwrap());
}

async fn fetch_all_returns_every_record(test: &mut DbTest) {
    let db = test.setup_db(models!(Person)).await;
    let people = db.collection::<Person>().unwrap();

    for (id, name) in [("a", "Ann"), ("b", "Bo"), ("c", "Cy")] {
        people
            .create(fields! { "id" => id, "name" => name, "age" => 30 })
            .await
            .unwrap();
    }

    let names: Vec<_> = people
        .fetch_all()
        .await
        .unwrap()
        .iter()
        .map(|person| person.get_str("name").unwrap().to_string())
        .collect();
    assert_eq!(vec!["Ann", "Bo", "Cy"], names);
}

tests!(
    create_then_fetch_round_trips,
    create_assigns_uuid_ids,
    explicit_id_is_kept_and_reuse_is_a_duplicate,
    update_validates_while_update_all_does_not,
    update_skips_fields_that_are_not_updatable,
    unknown_fields_are_rejected,
    failed_create_writes_nothing,
    save_writes_only_dirty_fields,
    save_with_nothing_dirty_writes_nothing,
    save_unchecked_skips_validation,
    reload_discards_unsaved_changes,
    reload_of_a_deleted_id_is_not_found,
    record_states_guard_operations,
    delete_of_a_missing_id_is_a_no_op,
    fetch_all_returns_every_record,
);
