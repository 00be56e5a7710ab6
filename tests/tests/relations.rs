use pretty_assertions::assert_eq;
use tests::prelude::*;

async fn setup(test: &mut DbTest) -> (Db, Record) {
    let db = test.setup_db(models!(Account, Project)).await;

    let account = db
        .collection::<Account>()
        .unwrap()
        .create(fields! {
            "email" => "sami@example.com",
            "first_name" => "Sami",
            "last_name" => "Samhuri",
            "hashed_password" => "secret-hash",
        })
        .await
        .unwrap();

    (db, account)
}

async fn create_project(db: &Db, account: &Record, name: &str) -> Record {
    db.collection::<Project>()
        .unwrap()
        .create(fields! { "name" => name, "account_id" => account.id().unwrap() })
        .await
        .unwrap()
}

async fn created_children_join_the_parent_set(test: &mut DbTest) {
    let (db, account) = setup(test).await;

    let a = create_project(&db, &account, "Alpha").await;
    let b = create_project(&db, &account, "Beta").await;

    let projects = db.has_many(&account, "project").unwrap();
    assert_eq!(2, projects.count().await.unwrap());

    let mut expected = vec![a.id().unwrap().to_string(), b.id().unwrap().to_string()];
    expected.sort();
    assert_eq!(expected, projects.ids().await.unwrap());

    let names: Vec<_> = projects
        .all()
        .await
        .unwrap()
        .into_iter()
        .map(|project| project.get_str("name").unwrap().to_string())
        .collect();
    assert_len!(names, 2);
    assert!(names.contains(&"Alpha".to_string()));
}

async fn child_resolves_its_parent(test: &mut DbTest) {
    let (db, account) = setup(test).await;
    let project = create_project(&db, &account, "Alpha").await;

    let owner = db.belongs_to(&project, "account").unwrap();
    assert_eq!(account.id(), owner.id());

    let fetched = assert_some!(owner.get().await.unwrap());
    assert_eq!(Some("sami@example.com"), fetched.get_str("email"));
}

async fn missing_parent_is_not_linked(test: &mut DbTest) {
    let (db, account) = setup(test).await;

    let orphan = db
        .collection::<Project>()
        .unwrap()
        .create(fields! { "name" => "Orphan", "account_id" => "no-such-account" })
        .await
        .unwrap();

    assert_eq!(0, db.has_many(&account, "project").unwrap().count().await.unwrap());
    assert_none!(db.belongs_to(&orphan, "account").unwrap().get().await.unwrap());
}

async fn changing_the_foreign_key_reparents(test: &mut DbTest) {
    let (db, first) = setup(test).await;
    let second = db
        .collection::<Account>()
        .unwrap()
        .create(fields! {
            "email" => "other@example.com",
            "first_name" => "Other",
            "last_name" => "Person",
            "hashed_password" => "secret-hash",
        })
        .await
        .unwrap();

    let mut project = create_project(&db, &first, "Alpha").await;

    db.update(&mut project, fields! { "account_id" => second.id().unwrap() })
        .await
        .unwrap();

    assert_eq!(0, db.has_many(&first, "project").unwrap().count().await.unwrap());
    assert_eq!(
        vec![project.id().unwrap().to_string()],
        db.has_many(&second, "project").unwrap().ids().await.unwrap()
    );
}

async fn deleting_a_parent_cascades(test: &mut DbTest) {
    let (db, mut account) = setup(test).await;
    let projects = db.collection::<Project>().unwrap();

    let mut ids = vec![];
    for name in ["Alpha", "Beta", "Gamma"] {
        let project = create_project(&db, &account, name).await;
        ids.push(project.id().unwrap().to_string());
    }

    let children_key = format!(
        "{}account:{}:project-ids",
        test.key_prefix(),
        account.id().unwrap()
    );

    test.log().clear();
    db.delete(&mut account).await.unwrap();

    assert_eq!(RecordState::Deleted, account.state());
    assert!(test.log().wrote(&children_key));

    for id in &ids {
        assert!(!projects.exists(id).await.unwrap());
        assert_none!(projects.fetch(id).await.unwrap());
    }
    assert_eq!(0, projects.count().await.unwrap());
    assert_none!(projects.id_for("name", "alpha").await.unwrap());

    let accounts = db.collection::<Account>().unwrap();
    assert!(!accounts.exists(account.id().unwrap()).await.unwrap());
    assert!(!accounts.is_taken("email", "sami@example.com").await.unwrap());
}

async fn deleting_a_child_unlinks_it(test: &mut DbTest) {
    let (db, account) = setup(test).await;
    let mut project = create_project(&db, &account, "Alpha").await;
    create_project(&db, &account, "Beta").await;

    db.delete(&mut project).await.unwrap();

    let children = db.has_many(&account, "project").unwrap();
    assert_eq!(1, children.count().await.unwrap());
    assert!(!children.ids().await.unwrap().contains(&project.id().unwrap().to_string()));
}

async fn child_ids_can_be_managed_directly(test: &mut DbTest) {
    let (db, account) = setup(test).await;
    let project = create_project(&db, &account, "Alpha").await;
    let id = project.id().unwrap();

    let children = db.has_many(&account, "project").unwrap();
    assert!(!children.add_id(id).await.unwrap());
    assert!(children.remove_id(id).await.unwrap());
    assert_empty!(children.ids().await.unwrap());
    assert!(children.add_id(id).await.unwrap());

    // Dangling ids are skipped when loading children
    children.add_id("gone").await.unwrap();
    assert_len!(children.all().await.unwrap(), 1);
}

async fn relation_misuse(test: &mut DbTest) {
    let (db, account) = setup(test).await;

    let err = assert_err!(db.has_many(&account, "account"));
    assert!(err.is_invalid_schema());

    let err = assert_err!(db.belongs_to(&account, "project"));
    assert!(err.is_invalid_schema());

    let draft = db
        .collection::<Account>()
        .unwrap()
        .build(fields! { "email" => "draft@example.com" })
        .unwrap();
    let err = assert_err!(db.has_many(&draft, "project"));
    assert!(err.is_invalid_state());
}

tests!(
    created_children_join_the_parent_set,
    child_resolves_its_parent,
    missing_parent_is_not_linked,
    changing_the_foreign_key_reparents,
    deleting_a_parent_cascades,
    deleting_a_child_unlinks_it,
    child_ids_can_be_managed_directly,
    relation_misuse,
);
