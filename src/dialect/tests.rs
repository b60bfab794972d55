//! Dialect rendering tests.

use crate::error::DdlError;
use crate::model::{Column, build};
use crate::record::{Descriptor, FieldDef, HostType, Record};

use super::{Dialect, mysql, postgres, sqlite};

struct User;

impl Record for User {
    fn descriptor() -> Descriptor {
        Descriptor::record("User")
            .field(FieldDef::of::<i64>("id").tag("ai"))
            .field(FieldDef::of::<String>("name").tag("len(50)"))
            .field(FieldDef::of::<f64>("score").tag("len(5,2)"))
    }

    fn meta() -> Option<&'static str> {
        Some("name(users)")
    }
}

struct Post;

impl Record for Post {
    fn descriptor() -> Descriptor {
        Descriptor::record("Post")
            .field(FieldDef::of::<i64>("id").tag("ai"))
            .field(FieldDef::of::<i64>("author").tag("fk(fk_author,users,id,NO ACTION,CASCADE)"))
            .field(FieldDef::of::<String>("slug").tag("len(100);unique(u_slug)"))
            .field(FieldDef::of::<i64>("cat").tag("index(idx_cat)"))
    }

    fn meta() -> Option<&'static str> {
        Some("name(posts);check(chk_cat,cat > 0)")
    }
}

fn col(host: HostType, len1: i32, len2: i32) -> Column {
    let mut col = Column::new("c", host);
    col.len1 = len1;
    col.len2 = len2;
    col
}

#[test]
fn test_mysql_type_mapping() {
    let d = mysql();
    let cases: &[(HostType, i32, i32, &str)] = &[
        (HostType::Bool, 0, 0, "BOOLEAN"),
        (HostType::I8, 0, 0, "SMALLINT"),
        (HostType::I16, 0, 0, "MEDIUMINT"),
        (HostType::I32, 0, 0, "INT"),
        (HostType::I64, 0, 0, "BIGINT"),
        (HostType::I64, 10, 0, "BIGINT(10)"),
        (HostType::U8, 0, 0, "SMALLINT UNSIGNED"),
        (HostType::U16, 3, 0, "MEDIUMINT(3) UNSIGNED"),
        (HostType::U32, 0, 0, "INT UNSIGNED"),
        (HostType::U64, 0, 0, "BIGINT UNSIGNED"),
        (HostType::F64, 10, 2, "DOUBLE(10,2)"),
        (HostType::Str, 100, 0, "VARCHAR(100)"),
        (HostType::Str, -1, 0, "LONGTEXT"),
        (HostType::Str, 70000, 0, "LONGTEXT"),
        (HostType::Bytes, 32, 0, "VARCHAR(32)"),
        (HostType::Chars, 0, 0, "LONGTEXT"),
        (HostType::NullBool, 0, 0, "BOOLEAN"),
        (HostType::NullI64, 0, 0, "BIGINT"),
        (HostType::NullStr, 20, 0, "VARCHAR(20)"),
        (HostType::DateTime, 0, 0, "DATETIME"),
    ];
    for &(host, len1, len2, expected) in cases {
        assert_eq!(
            d.column_sql_type(&col(host, len1, len2)).unwrap(),
            expected,
            "mapping {host}"
        );
    }
}

#[test]
fn test_mysql_float_requires_lengths() {
    let d = mysql();
    assert!(matches!(
        d.column_sql_type(&col(HostType::F64, 0, 0)),
        Err(DdlError::MissingLength { .. })
    ));
    assert!(matches!(
        d.column_sql_type(&col(HostType::F32, 10, 0)),
        Err(DdlError::MissingLength { .. })
    ));
}

#[test]
fn test_unsupported_types_rejected() {
    for d in [
        mysql() as &dyn Dialect,
        sqlite() as &dyn Dialect,
        postgres() as &dyn Dialect,
    ] {
        assert!(matches!(
            d.column_sql_type(&col(HostType::Seq("f32"), 0, 0)),
            Err(DdlError::UnsupportedType(name)) if name == "Vec<f32>"
        ));
        assert!(matches!(
            d.column_sql_type(&col(HostType::Other("IpAddr"), 0, 0)),
            Err(DdlError::UnsupportedType(_))
        ));
    }
}

#[test]
fn test_mysql_create_table() {
    let m = build::<User>().unwrap();
    let stmts = mysql().create_table_sql(&m).unwrap();
    assert_eq!(stmts.len(), 1);
    assert_eq!(
        stmts[0],
        "CREATE TABLE IF NOT EXISTS {users}(\
         `id` BIGINT NOT NULL PRIMARY KEY AUTO_INCREMENT,\
         `name` VARCHAR(50) NOT NULL,\
         `score` DOUBLE(5,2) NOT NULL)"
    );
}

#[test]
fn test_mysql_create_table_constraints() {
    let m = build::<Post>().unwrap();
    let stmts = mysql().create_table_sql(&m).unwrap();
    assert_eq!(
        stmts[0],
        "CREATE TABLE IF NOT EXISTS {posts}(\
         `id` BIGINT NOT NULL PRIMARY KEY AUTO_INCREMENT,\
         `author` BIGINT NOT NULL,\
         `slug` VARCHAR(100) NOT NULL,\
         `cat` BIGINT NOT NULL,\
         CONSTRAINT `chk_cat` CHECK(cat > 0),\
         CONSTRAINT `fk_author` FOREIGN KEY(`author`) REFERENCES users(`id`) ON UPDATE NO ACTION ON DELETE CASCADE,\
         CONSTRAINT `u_slug` UNIQUE(`slug`),\
         INDEX `idx_cat`(`cat`))"
    );
}

#[test]
fn test_mysql_composite_pk_and_defaults() {
    struct Pair;
    impl Record for Pair {
        fn descriptor() -> Descriptor {
            Descriptor::record("Pair")
                .field(FieldDef::of::<i64>("a").tag("pk"))
                .field(FieldDef::of::<i64>("b").tag("pk"))
                .field(FieldDef::of::<i64>("n").tag("nullable;default(7)"))
        }
    }

    let m = build::<Pair>().unwrap();
    let stmts = mysql().create_table_sql(&m).unwrap();
    assert_eq!(
        stmts[0],
        "CREATE TABLE IF NOT EXISTS {Pair}(\
         `a` BIGINT NOT NULL,\
         `b` BIGINT NOT NULL,\
         `n` BIGINT DEFAULT 7,\
         PRIMARY KEY(`a`,`b`))"
    );
}

#[test]
fn test_mysql_table_options() {
    struct Configured;
    impl Record for Configured {
        fn descriptor() -> Descriptor {
            Descriptor::record("Configured").field(FieldDef::of::<i64>("id"))
        }
        fn meta() -> Option<&'static str> {
            Some("engine(innodb);charset(utf8mb4)")
        }
    }

    let m = build::<Configured>().unwrap();
    let stmts = mysql().create_table_sql(&m).unwrap();
    assert_eq!(
        stmts[0],
        "CREATE TABLE IF NOT EXISTS {Configured}(`id` BIGINT NOT NULL) ENGINE=innodb CHARACTER SET=utf8mb4"
    );
}

#[test]
fn test_mysql_table_option_arity() {
    struct TooMany;
    impl Record for TooMany {
        fn descriptor() -> Descriptor {
            Descriptor::record("TooMany").field(FieldDef::of::<i64>("id"))
        }
        fn meta() -> Option<&'static str> {
            Some("engine(a,b)")
        }
    }

    let m = build::<TooMany>().unwrap();
    let err = mysql().create_table_sql(&m).unwrap_err();
    assert!(matches!(err, DdlError::InvalidTableOption { option } if option == "engine"));

    // A recognized option with zero arguments silently emits nothing.
    struct Bare;
    impl Record for Bare {
        fn descriptor() -> Descriptor {
            Descriptor::record("Bare").field(FieldDef::of::<i64>("id"))
        }
        fn meta() -> Option<&'static str> {
            Some("engine()")
        }
    }

    let m = build::<Bare>().unwrap();
    let stmts = mysql().create_table_sql(&m).unwrap();
    assert_eq!(stmts[0], "CREATE TABLE IF NOT EXISTS {Bare}(`id` BIGINT NOT NULL)");
}

#[test]
fn test_mysql_fragments() {
    let d = mysql();
    assert_eq!(
        d.limit_sql(10, Some(5)),
        (" LIMIT ? OFFSET ?".to_string(), vec![10, 5])
    );
    assert_eq!(d.limit_sql(10, None), (" LIMIT ?".to_string(), vec![10]));
    assert_eq!(d.truncate_table_sql("{users}", "id"), "TRUNCATE TABLE {users}");
    assert!(!d.transactional_ddl());
    assert_eq!(d.sql("SELECT 1").unwrap(), "SELECT 1");
}

#[test]
fn test_sqlite_create_table() {
    let m = build::<Post>().unwrap();
    let stmts = sqlite().create_table_sql(&m).unwrap();
    assert_eq!(stmts.len(), 2);
    assert_eq!(
        stmts[0],
        "CREATE TABLE IF NOT EXISTS {posts}(\
         \"id\" INTEGER PRIMARY KEY AUTOINCREMENT,\
         \"author\" INTEGER NOT NULL,\
         \"slug\" TEXT NOT NULL,\
         \"cat\" INTEGER NOT NULL,\
         CONSTRAINT \"chk_cat\" CHECK(cat > 0),\
         CONSTRAINT \"fk_author\" FOREIGN KEY(\"author\") REFERENCES users(\"id\") ON UPDATE NO ACTION ON DELETE CASCADE,\
         CONSTRAINT \"u_slug\" UNIQUE(\"slug\"))"
    );
    assert_eq!(stmts[1], "CREATE INDEX \"idx_cat\" ON {posts}(\"cat\")");
}

#[test]
fn test_sqlite_fragments() {
    let d = sqlite();
    assert_eq!(d.truncate_table_sql("{t}", ""), "DELETE FROM {t}");
    assert_eq!(
        d.truncate_table_sql("{t}", "id"),
        "DELETE FROM {t};DELETE FROM sqlite_sequence WHERE name='{t}'"
    );
    assert!(d.transactional_ddl());
}

#[test]
fn test_postgres_create_table() {
    let m = build::<User>().unwrap();
    let stmts = postgres().create_table_sql(&m).unwrap();
    assert_eq!(stmts.len(), 1);
    assert_eq!(
        stmts[0],
        "CREATE TABLE IF NOT EXISTS {users}(\
         \"id\" BIGSERIAL PRIMARY KEY,\
         \"name\" VARCHAR(50) NOT NULL,\
         \"score\" NUMERIC(5,2) NOT NULL)"
    );
}

#[test]
fn test_postgres_type_mapping() {
    let d = postgres();
    assert_eq!(d.column_sql_type(&col(HostType::U8, 0, 0)).unwrap(), "INT");
    assert_eq!(
        d.column_sql_type(&col(HostType::U64, 0, 0)).unwrap(),
        "BIGINT"
    );
    assert_eq!(
        d.column_sql_type(&col(HostType::Str, -1, 0)).unwrap(),
        "TEXT"
    );
    assert_eq!(
        d.column_sql_type(&col(HostType::DateTime, 0, 0)).unwrap(),
        "TIMESTAMP"
    );
}

#[test]
fn test_postgres_placeholder_rewrite() {
    let d = postgres();
    assert_eq!(
        d.sql("SELECT * FROM t WHERE a=? AND b='?' AND c=?").unwrap(),
        "SELECT * FROM t WHERE a=$1 AND b='?' AND c=$2"
    );
    assert_eq!(
        d.truncate_table_sql("{t}", "id"),
        "TRUNCATE TABLE {t} RESTART IDENTITY"
    );
    assert!(d.transactional_ddl());
}

#[test]
fn test_quote_tuples() {
    assert_eq!(mysql().quote_tuple(), ('`', '`'));
    assert_eq!(sqlite().quote_tuple(), ('"', '"'));
    assert_eq!(postgres().quote_tuple(), ('"', '"'));
}
