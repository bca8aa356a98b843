//! Fixtures shared by the integration tests.
#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use std::collections::BTreeMap;
use zson_core::{enumeration, record, ClassDescriptor, FieldDescriptor, Host, Reflect};

// ============================================================================
// Hand-written descriptors: a parent/child chain with every field storage
// ============================================================================

fn null() -> Host {
    Host::Null
}

pub static ANIMAL_FIELDS: [FieldDescriptor; 2] = [
    FieldDescriptor::new("name", <String as Reflect>::shape, null),
    FieldDescriptor::new("legs", <i32 as Reflect>::shape, <i32 as Reflect>::default_host),
];

pub static ANIMAL: ClassDescriptor = ClassDescriptor {
    name: "Animal",
    parent: None,
    fields: &ANIMAL_FIELDS,
    constructible: true,
};

pub static DOG_FIELDS: [FieldDescriptor; 4] = [
    FieldDescriptor::new("breed", <String as Reflect>::shape, null),
    FieldDescriptor::new("cache", <String as Reflect>::shape, null).transient(),
    FieldDescriptor::new("COUNT", <i32 as Reflect>::shape, <i32 as Reflect>::default_host)
        .class_level(),
    FieldDescriptor::new("id", <i64 as Reflect>::shape, <i64 as Reflect>::default_host)
        .read_only(),
];

pub static DOG: ClassDescriptor = ClassDescriptor {
    name: "Dog",
    parent: Some(&ANIMAL),
    fields: &DOG_FIELDS,
    constructible: true,
};

/// A class without a no-argument constructor.
pub static LOCKED: ClassDescriptor = ClassDescriptor {
    name: "Locked",
    parent: None,
    fields: &[],
    constructible: false,
};

// ============================================================================
// Macro-registered types
// ============================================================================

enumeration! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Level {
        Low,
        Medium,
        High,
    }
}

record! {
    #[derive(Debug, Clone, PartialEq)]
    pub struct Person {
        pub name: String,
        pub age: i32,
        pub email: Option<String>,
        pub tags: Vec<String>,
        pub scores: BTreeMap<String, i64>,
        pub level: Option<Level>,
        pub born: Option<NaiveDateTime>,
    }
}

record! {
    #[derive(Debug, Clone, PartialEq)]
    pub struct Team {
        pub title: String,
        pub lead: Option<Person>,
        pub members: Vec<Person>,
    }
}

record! {
    #[derive(Debug, Clone, PartialEq)]
    pub struct Ticket {
        pub level: Level,
        pub owner: Person,
    }
}

pub fn at(year: i32, month: u32, day: u32, h: u32, m: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(h, m, s))
        .unwrap()
}

pub fn ann() -> Person {
    Person {
        name: "Ann".to_string(),
        age: 41,
        email: None,
        tags: vec!["admin".to_string(), "ops".to_string()],
        scores: [("go".to_string(), 3), ("rust".to_string(), 9)].into_iter().collect(),
        level: Some(Level::High),
        born: Some(at(1983, 7, 14, 6, 30, 0)),
    }
}

pub fn bob() -> Person {
    Person {
        name: "Bob".to_string(),
        age: 29,
        email: Some("bob@example.com".to_string()),
        tags: vec!["dev".to_string()],
        scores: BTreeMap::new(),
        level: None,
        born: None,
    }
}
