//! End-to-end resolution through the facade crate.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use sijill::prelude::*;
use tracing_test::traced_test;

#[derive(Debug, Injectable)]
struct Credentials {
    user: String,
    password: String,
}

#[derive(Debug, Injectable)]
struct Transport {
    #[injectable(inject)]
    credentials: Arc<Credentials>,
    host: String,
    #[injectable(default)]
    sent: Arc<AtomicUsize>,
}

type Formatter = Arc<dyn Fn(&str) -> String + Send + Sync>;

#[derive(Injectable)]
struct Mailer {
    #[injectable(inject)]
    transport: Arc<Transport>,
    format: Formatter,
}

impl Mailer {
    fn send(&self, body: &str) -> String {
        self.transport.sent.fetch_add(1, Ordering::SeqCst);
        (self.format)(body)
    }
}

fn wired() -> Registry {
    let formatter: Formatter = Arc::new(|body: &str| format!("[mail] {body}"));
    let mut registry = Registry::new();
    registry
        .register::<Credentials>(args![String::from("ops"), String::from("hunter2")])
        .register::<Transport>(args![@Credentials, String::from("smtp.local")])
        .register::<Mailer>(args![@Transport, formatter]);
    registry
}

#[test]
fn builds_the_whole_graph() {
    let registry = wired();
    let mailer = registry.resolve::<Mailer>().unwrap();

    assert_eq!(mailer.transport.host, "smtp.local");
    assert_eq!(mailer.transport.credentials.user, "ops");
    assert_eq!(mailer.send("hello"), "[mail] hello");
}

#[test]
fn recipe_dependencies_are_rebuilt_each_time() {
    let registry = wired();
    let first = registry.resolve::<Mailer>().unwrap();
    let second = registry.resolve::<Mailer>().unwrap();

    assert!(!Arc::ptr_eq(&first.transport, &second.transport));
    assert!(!Arc::ptr_eq(&first.transport.credentials, &second.transport.credentials));
}

#[test]
fn singleton_transport_is_shared_by_every_mailer() {
    let mut registry = wired();
    registry
        .register_singleton::<Transport>(args![@Credentials, String::from("relay.local")])
        .unwrap();

    let first = registry.resolve::<Mailer>().unwrap();
    let second = registry.resolve::<Mailer>().unwrap();
    first.send("a");
    second.send("b");

    assert!(Arc::ptr_eq(&first.transport, &second.transport));
    let transport = registry.resolve::<Transport>().unwrap();
    assert_eq!(transport.host, "relay.local");
    assert_eq!(transport.sent.load(Ordering::SeqCst), 2);
}

#[test]
fn append_fills_the_rest_of_a_recipe() {
    let mut registry = Registry::new();
    registry
        .register::<Credentials>(args![String::from("ops")])
        .append_args::<Credentials>(args![String::from("secret")])
        .unwrap();

    let credentials = registry.resolve::<Credentials>().unwrap();
    assert_eq!(credentials.password, "secret");
}

#[test]
fn delete_then_resolve_fails() {
    let mut registry = wired();
    registry.delete::<Credentials>().unwrap();
    assert!(!registry.has::<Credentials>());

    let Err(err) = registry.resolve::<Mailer>() else {
        panic!("Expected Credentials to be missing");
    };
    let SijillError::NotRegistered(details) = &err else {
        panic!("Expected NotRegistered, got: {err:?}");
    };
    assert_eq!(details.requested, DependencyKey::of::<Credentials>());
    assert_eq!(
        details.path,
        vec![DependencyKey::of::<Mailer>(), DependencyKey::of::<Transport>()]
    );
    assert!(err.to_string().contains("Mailer → Transport → Credentials"));
}

#[test]
fn chaining_keeps_the_same_registry() {
    let mut registry = Registry::new();
    registry
        .register::<Credentials>(args![String::from("a"), String::from("b")])
        .register_singleton::<Transport>(args![@Credentials, String::from("h")])
        .unwrap()
        .register::<Mailer>(args![@Transport, Arc::new(|s: &str| s.to_owned()) as Formatter]);

    assert!(registry.has::<Credentials>());
    assert!(registry.has_singleton::<Transport>());
    assert_eq!(registry.resolve::<Mailer>().unwrap().send("x"), "x");
}

#[test]
fn permissive_registry_fills_gaps() {
    #[derive(Debug, Default, Clone, Injectable)]
    struct Retry {
        #[injectable(default)]
        attempts: u8,
    }

    #[derive(Injectable)]
    struct Job {
        #[injectable(inject)]
        retry: Arc<Retry>,
    }

    let mut registry = Registry::builder().policy(Policy::Permissive).build();
    registry.register::<Job>(args![@Retry]);

    assert_eq!(registry.resolve::<Job>().unwrap().retry.attempts, 0);
    registry.append_args::<Retry>(args![3u8]).unwrap();
    assert_eq!(registry.resolve::<Job>().unwrap().retry.attempts, 3);
}

#[test]
fn shared_registry_through_facade() {
    let shared = SharedRegistry::from(wired());
    let worker = shared.clone();

    let sent = std::thread::spawn(move || worker.resolve::<Mailer>().map(|m| m.send("hi")))
        .join()
        .unwrap()
        .unwrap();
    assert_eq!(sent, "[mail] hi");
}

#[test]
#[traced_test]
fn resolver_logs_permissive_fallback() {
    let mut registry = Registry::permissive();
    registry.register::<Transport>(args![@Credentials, String::from("smtp.local")]);

    // Credentials is missing and cannot be built from nothing
    assert!(registry.resolve::<Transport>().is_err());

    assert!(logs_contain("Registered recipe"));
    assert!(logs_contain("Injecting dependency"));
    assert!(logs_contain("constructing from no arguments"));
}
