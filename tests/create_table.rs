//! End-to-end: annotated records through the cache to rendered DDL.

use std::sync::Arc;

use pretty_assertions::assert_eq;

use ddlgen::prelude::*;

struct Account;

impl Record for Account {
    fn descriptor() -> Descriptor {
        Descriptor::record("Account")
            .field(FieldDef::of::<i64>("id").tag("ai"))
            .field(FieldDef::of::<String>("name").tag("len(50)"))
            .field(FieldDef::of::<f64>("score").tag("len(5,2)"))
    }
}

struct Order;

impl Record for Order {
    fn descriptor() -> Descriptor {
        Descriptor::record("Order")
            .field(FieldDef::of::<i64>("id").tag("ai"))
            .field(FieldDef::of::<i64>("account").tag("fk(fk_order_account,Account,id)"))
            .field(FieldDef::of::<i64>("version").tag("occ"))
            .field(FieldDef::of::<Option<String>>("note").tag("nullable"))
    }

    fn meta() -> Option<&'static str> {
        Some("name(orders)")
    }
}

#[test]
fn test_mysql_end_to_end() {
    let cache = ModelCache::new();
    let model = cache.lookup_or_build::<Account>().unwrap();

    let stmts = mysql().create_table_sql(&model).unwrap();
    assert_eq!(stmts.len(), 1);
    assert_eq!(
        stmts[0],
        "CREATE TABLE IF NOT EXISTS {Account}(\
         `id` BIGINT NOT NULL PRIMARY KEY AUTO_INCREMENT,\
         `name` VARCHAR(50) NOT NULL,\
         `score` DOUBLE(5,2) NOT NULL)"
    );
}

#[test]
fn test_all_dialects_render_the_same_model() {
    let cache = ModelCache::new();
    let model = cache.lookup_or_build::<Order>().unwrap();

    let dialects: [&dyn Dialect; 3] = [mysql(), sqlite(), postgres()];
    for d in dialects {
        let stmts = d.create_table_sql(&model).unwrap();
        assert!(
            stmts[0].starts_with("CREATE TABLE IF NOT EXISTS {orders}("),
            "{}: {}",
            d.name(),
            stmts[0]
        );
        assert!(stmts[0].contains("fk_order_account"), "{}", d.name());
    }

    assert_eq!(
        sqlite().create_table_sql(&model).unwrap()[0],
        "CREATE TABLE IF NOT EXISTS {orders}(\
         \"id\" INTEGER PRIMARY KEY AUTOINCREMENT,\
         \"account\" INTEGER NOT NULL,\
         \"version\" INTEGER NOT NULL,\
         \"note\" TEXT,\
         CONSTRAINT \"fk_order_account\" FOREIGN KEY(\"account\") REFERENCES Account(\"id\"))"
    );
}

#[test]
fn test_cache_returns_shared_models() {
    let cache = ModelCache::new();
    let a = cache.lookup_or_build::<Account>().unwrap();
    let b = cache.lookup_or_build::<Account>().unwrap();
    assert!(Arc::ptr_eq(&a, &b));

    cache.clear();
    let c = cache.lookup_or_build::<Account>().unwrap();
    assert!(!Arc::ptr_eq(&a, &c));
    assert_eq!(*a, *c);
}

#[test]
fn test_model_serializes() {
    let cache = ModelCache::new();
    let model = cache.lookup_or_build::<Order>().unwrap();

    let json: serde_json::Value = serde_json::to_value(&*model).unwrap();
    assert_eq!(json["name"], "orders");
    assert_eq!(json["ai"], 0);
    assert_eq!(json["occ"], 2);
    assert_eq!(json["foreign_keys"]["fk_order_account"]["ref_table"], "Account");
}
