use crate::registry::Params;
use crate::trace::{Mutation, Outcome, Recorder, Step, StepKind, Trace};

pub const BUCKETS: usize = 7;

pub const DEFAULT_ENTRIES: [(&str, &str); 5] = [
    ("name", "John"),
    ("age", "30"),
    ("city", "Paris"),
    ("role", "dev"),
    ("name", "Jane"),
];

pub fn default_entries() -> Vec<(String, String)> {
    DEFAULT_ENTRIES
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

/// Position-weighted character-code hash, reduced after every character.
pub fn bucket_of(key: &str) -> usize {
    key.chars()
        .enumerate()
        .fold(0, |hash, (i, ch)| hash_step(hash, ch, i))
}

fn hash_step(hash: usize, ch: char, position: usize) -> usize {
    let code = u32::from(ch) as usize;
    (hash + code * (position + 1)) % BUCKETS
}

/// Separate-chaining table. The working collection mirrors its chain lengths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashTable {
    buckets: Vec<Vec<(String, String)>>,
}

impl Default for HashTable {
    fn default() -> Self {
        HashTable {
            buckets: vec![Vec::new(); BUCKETS],
        }
    }
}

impl HashTable {
    pub fn from_entries(entries: &[(String, String)]) -> Self {
        let mut table = HashTable::default();
        for (key, value) in entries {
            table.insert(key, value);
        }
        table
    }

    /// Returns true when the key was new; an existing key has its value replaced.
    pub fn insert(&mut self, key: &str, value: &str) -> bool {
        let chain = &mut self.buckets[bucket_of(key)];
        match chain.iter_mut().find(|(existing, _)| existing == key) {
            Some(entry) => {
                entry.1 = value.to_string();
                false
            }
            None => {
                chain.push((key.to_string(), value.to_string()));
                true
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.buckets[bucket_of(key)]
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value.as_str())
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        let chain = &mut self.buckets[bucket_of(key)];
        let pos = chain.iter().position(|(existing, _)| existing == key)?;
        Some(chain.remove(pos).1)
    }

    pub fn chain(&self, bucket: usize) -> &[(String, String)] {
        self.buckets.get(bucket).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn chain_lengths(&self) -> Vec<i64> {
        self.buckets.iter().map(|chain| chain.len() as i64).collect()
    }
}

pub fn insert(collection: &[i64], params: &Params) -> Trace {
    if collection.len() != BUCKETS {
        return Trace::empty();
    }
    let mut rec = Recorder::new(collection);
    let mut table = HashTable::default();
    for (key, value) in &params.entries {
        let bucket = record_hash(&mut rec, key);
        let existing = walk_chain(&mut rec, &table, bucket, key);
        table.insert(key, value);
        let step = match existing {
            Some(_) => Step::new(
                StepKind::Write,
                format!("update '{key}' = '{value}' in bucket {bucket}"),
            )
            .counts(0, 1),
            None => {
                let len = table.chain(bucket).len();
                let note = if len > 1 {
                    format!("collision: chain '{key}' = '{value}' onto bucket {bucket} ({len} entries)")
                } else {
                    format!("store '{key}' = '{value}' in bucket {bucket}")
                };
                Step::new(StepKind::Write, note)
                    .mutation(Mutation::Assign {
                        index: bucket,
                        value: len as i64,
                    })
                    .counts(0, 1)
            }
        };
        rec.record(step.highlight(vec![bucket]).resolve(vec![bucket]));
    }
    rec.finish(Outcome::Completed)
}

pub fn search(collection: &[i64], params: &Params) -> Trace {
    if collection.len() != BUCKETS {
        return Trace::empty();
    }
    let table = HashTable::from_entries(&params.entries);
    let key = params.word.as_str();
    let mut rec = Recorder::new(collection);
    let bucket = record_hash(&mut rec, key);
    match walk_chain(&mut rec, &table, bucket, key) {
        Some(pos) => {
            let value = table.chain(bucket)[pos].1.clone();
            rec.resolve(vec![bucket]);
            rec.finish(Outcome::Entry { bucket, value })
        }
        None => rec.finish(Outcome::NotFound),
    }
}

pub fn delete(collection: &[i64], params: &Params) -> Trace {
    if collection.len() != BUCKETS {
        return Trace::empty();
    }
    let mut table = HashTable::from_entries(&params.entries);
    let key = params.word.as_str();
    let mut rec = Recorder::new(collection);
    let bucket = record_hash(&mut rec, key);
    if walk_chain(&mut rec, &table, bucket, key).is_none() {
        return rec.finish(Outcome::NotFound);
    }
    let Some(value) = table.remove(key) else {
        return rec.finish(Outcome::NotFound);
    };
    let len = table.chain(bucket).len() as i64;
    rec.assign(
        bucket,
        len,
        StepKind::Write,
        format!("unlink '{key}' from bucket {bucket}"),
    );
    rec.finish(Outcome::Removed { bucket, value })
}

fn record_hash(rec: &mut Recorder, key: &str) -> usize {
    let mut hash = 0;
    for (i, ch) in key.chars().enumerate() {
        let next = hash_step(hash, ch, i);
        rec.record(Step::new(
            StepKind::Probe,
            format!(
                "hash '{key}': ({hash} + '{ch}'={} × {}) mod {BUCKETS} = {next}",
                u32::from(ch),
                i + 1
            ),
        ));
        hash = next;
    }
    rec.record(
        Step::new(StepKind::Probe, format!("'{key}' lands in bucket {hash}"))
            .highlight(vec![hash])
            .counts(0, 1),
    );
    hash
}

fn walk_chain(rec: &mut Recorder, table: &HashTable, bucket: usize, key: &str) -> Option<usize> {
    for (pos, (existing, _)) in table.chain(bucket).iter().enumerate() {
        let hit = existing == key;
        let verdict = if hit { "match" } else { "next" };
        rec.record(
            Step::new(
                StepKind::Compare,
                format!("bucket {bucket} entry {pos}: '{existing}' vs '{key}', {verdict}"),
            )
            .highlight(vec![bucket])
            .counts(1, 1),
        );
        if hit {
            return Some(pos);
        }
    }
    None
}
