//! Test doubles and common utilities for contract tests
//!
//! The doubles record every call they receive so tests can assert on the
//! exact sequence of provider requests a pass produces.

#![allow(dead_code)]

use ddns_core::error::{Error, Result};
use ddns_core::traits::{DnsProvider, IpSource, Record};
use ddns_core::{DdnsConfig, HostRegistry};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// A provider call as seen by [`MockDnsProvider`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    List { domain: String },
    Create { domain: String, record: Record },
    Update { domain: String, record: Record },
}

impl Call {
    pub fn is_mutation(&self) -> bool {
        !matches!(self, Call::List { .. })
    }
}

/// How the listing call should fail, if at all
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListFailure {
    Transport,
    Decode,
}

#[derive(Default)]
struct ProviderState {
    records: Vec<Record>,
    calls: Vec<Call>,
    list_failure: Option<ListFailure>,
    failing_hosts: Vec<String>,
    next_id: u32,
}

/// An in-memory provider that applies creates and updates to its record set
///
/// Clones share state, so a test can keep one handle while the engine owns another.
#[derive(Clone, Default)]
pub struct MockDnsProvider {
    state: Arc<Mutex<ProviderState>>,
}

impl MockDnsProvider {
    pub fn new(records: Vec<Record>) -> Self {
        let provider = Self::default();
        {
            let mut state = provider.state.lock().unwrap();
            state.records = records;
            state.next_id = 1000;
        }
        provider
    }

    /// Make the listing call fail
    pub fn fail_listing(&self, failure: ListFailure) {
        self.state.lock().unwrap().list_failure = Some(failure);
    }

    /// Make creates and updates for `host` fail with a transport error
    pub fn fail_mutations_for(&self, host: &str) {
        self.state.lock().unwrap().failing_hosts.push(host.to_string());
    }

    /// Clear all injected failures
    pub fn heal(&self) {
        let mut state = self.state.lock().unwrap();
        state.list_failure = None;
        state.failing_hosts.clear();
    }

    /// Every call received so far
    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Only creates and updates
    pub fn mutations(&self) -> Vec<Call> {
        self.calls().into_iter().filter(Call::is_mutation).collect()
    }

    pub fn list_count(&self) -> usize {
        self.calls().iter().filter(|c| !c.is_mutation()).count()
    }

    /// Current remote record set
    pub fn records(&self) -> Vec<Record> {
        self.state.lock().unwrap().records.clone()
    }

    /// Change a record's answer without going through the API
    pub fn edit_answer(&self, host: &str, answer: &str) {
        let mut state = self.state.lock().unwrap();
        for record in state.records.iter_mut().filter(|r| r.host == host) {
            record.answer = answer.to_string();
        }
    }

    pub fn clear_calls(&self) {
        self.state.lock().unwrap().calls.clear();
    }
}

#[async_trait::async_trait]
impl DnsProvider for MockDnsProvider {
    async fn list_records(&self, domain: &str) -> Result<Vec<Record>> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::List {
            domain: domain.to_string(),
        });

        match state.list_failure {
            Some(ListFailure::Transport) => {
                Err(Error::transport("list records", "connection refused"))
            }
            Some(ListFailure::Decode) => Err(Error::decode("list records", "expected value")),
            None => Ok(state.records.clone()),
        }
    }

    async fn create_record(&self, domain: &str, record: &Record) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::Create {
            domain: domain.to_string(),
            record: record.clone(),
        });

        if state.failing_hosts.contains(&record.host) {
            return Err(Error::transport("create record", "timed out"));
        }

        let mut created = record.clone();
        created.id = Some(state.next_id);
        state.next_id += 1;
        state.records.push(created);
        Ok(())
    }

    async fn update_record(&self, domain: &str, record: &Record) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::Update {
            domain: domain.to_string(),
            record: record.clone(),
        });

        if state.failing_hosts.contains(&record.host) {
            return Err(Error::transport("update record", "timed out"));
        }

        if let Some(existing) = state.records.iter_mut().find(|r| r.id == record.id) {
            *existing = record.clone();
        }
        Ok(())
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }
}

/// An IP source that replays a script of answers
///
/// `None` entries fail with a transport error. Once the script is exhausted
/// the last entry repeats.
#[derive(Clone)]
pub struct ScriptedIpSource {
    script: Arc<Mutex<VecDeque<Option<String>>>>,
    last: Arc<Mutex<Option<String>>>,
    fetch_count: Arc<AtomicUsize>,
}

impl ScriptedIpSource {
    pub fn new(script: &[Option<&str>]) -> Self {
        Self {
            script: Arc::new(Mutex::new(
                script.iter().map(|s| s.map(str::to_string)).collect(),
            )),
            last: Arc::new(Mutex::new(None)),
            fetch_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Always answer `ip`
    pub fn fixed(ip: &str) -> Self {
        Self::new(&[Some(ip)])
    }

    pub fn fetch_count(&self) -> usize {
        self.fetch_count.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl IpSource for ScriptedIpSource {
    async fn fetch(&self) -> Result<String> {
        self.fetch_count.fetch_add(1, Ordering::SeqCst);

        let mut last = self.last.lock().unwrap();
        if let Some(next) = self.script.lock().unwrap().pop_front() {
            *last = next;
        }

        last.clone()
            .ok_or_else(|| Error::transport("fetch ip", "connection refused"))
    }

    fn source_name(&self) -> &'static str {
        "scripted"
    }
}

/// An address record as the provider would list it
pub fn a_record(id: u32, host: &str, answer: &str) -> Record {
    Record {
        id: Some(id),
        host: host.to_string(),
        record_type: "A".to_string(),
        answer: answer.to_string(),
        ttl: Some(300),
    }
}

/// Build a registry from `(host, last applied ip)` pairs
pub fn registry(entries: &[(&str, Option<&str>)]) -> HostRegistry {
    let mut registry = HostRegistry::from_hosts(entries.iter().map(|(h, _)| *h));
    for (host, ip) in entries {
        if let Some(ip) = ip {
            registry.record_applied(host, ip);
        }
    }
    registry
}

/// Minimal valid configuration managing `hosts` in example.com
pub fn minimal_config(hosts: &str) -> DdnsConfig {
    DdnsConfig::new(
        "https://ifconfig.me/ip",
        "test-user",
        "test-token",
        "example.com",
    )
    .with_hosts(hosts)
}
