use kvmodel::schema::{BelongsToOptions, FieldOptions, FieldTy, Model};
use pretty_assertions::assert_eq;
use tests::prelude::*;

fn tag() -> Model {
    Model::builder("tag")
        .field("id", FieldOptions::new().required())
        .field("label", FieldOptions::of(FieldTy::String).unique())
        .build()
        .unwrap()
}

async fn runtime_models_work_like_declared_ones(test: &mut DbTest) {
    let mut builder = Db::builder();
    builder.model(tag());
    let db = test.setup_db(builder).await;

    let tags = db.collection_named("tag").unwrap();
    let record = tags.create(fields! { "label" => "Rust" }).await.unwrap();

    assert!(tags.is_taken("label", "rust").await.unwrap());
    assert_eq!(Some("Rust"), record.get_str("label"));

    let err = assert_err!(db.collection_named("nope"));
    assert!(err.is_invalid_schema());
}

async fn unpaired_relations_are_rejected(test: &mut DbTest) {
    let err = assert_err!(test.try_setup_db(models!(Account)).await);
    assert_eq!(
        "invalid schema: `account` has many `project`, which is not registered",
        err.to_string()
    );

    let mut builder = models!(Account);
    builder.model(
        Model::builder("project")
            .field("id", FieldOptions::new().required())
            .build()
            .unwrap(),
    );
    let err = assert_err!(test.try_setup_db(builder).await);
    assert!(err.is_invalid_schema());

    let mut builder = Db::builder();
    builder.model(
        Model::builder("note")
            .field("id", FieldOptions::new().required())
            .belongs_to("account", BelongsToOptions::new())
            .build()
            .unwrap(),
    );
    assert!(assert_err!(test.try_setup_db(builder).await).is_invalid_schema());
}

async fn duplicate_models_are_rejected(test: &mut DbTest) {
    let mut builder = models!(Person);
    builder.register::<Person>();

    let err = assert_err!(test.try_setup_db(builder).await);
    assert!(err.is_invalid_schema());
}

async fn key_prefix_scopes_every_key(test: &mut DbTest) {
    let db = test.setup_db(models!(Person)).await;
    let prefix = test.key_prefix();

    test.log().clear();
    db.collection::<Person>()
        .unwrap()
        .create(fields! { "id" => "p1", "name" => "Sami", "age" => 29 })
        .await
        .unwrap();

    let keys: Vec<_> = test
        .log()
        .operations()
        .iter()
        .map(|op| op.key().to_string())
        .collect();
    assert!(keys.iter().all(|key| key.starts_with(&prefix)));
    assert!(keys.contains(&format!("{prefix}person:p1")));
    assert!(keys.contains(&format!("{prefix}person-ids")));
}

async fn connect_by_url(test: &mut DbTest) {
    let url = test.url();
    let db = models!(Person).connect(url).await.unwrap();

    let people = db.collection::<Person>().unwrap();
    people
        .create(fields! { "name" => "Sami", "age" => 29 })
        .await
        .unwrap();
    assert_eq!(1, people.count().await.unwrap());

    let err = assert_err!(models!(Person).connect("redis://localhost:6379").await);
    assert!(err.is_invalid_connection_url());
}

tests!(
    runtime_models_work_like_declared_ones,
    unpaired_relations_are_rejected,
    duplicate_models_are_rejected,
    key_prefix_scopes_every_key,
    connect_by_url,
);
