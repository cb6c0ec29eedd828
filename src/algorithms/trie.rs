use crate::registry::Params;
use crate::trace::{Outcome, Recorder, Step, StepKind, Trace};
use std::collections::BTreeMap;

pub const DEFAULT_WORDS: [&str; 8] = [
    "app",
    "apple",
    "application",
    "apply",
    "april",
    "ape",
    "best",
    "better",
];

#[derive(Debug, Default)]
struct Node {
    children: BTreeMap<char, Node>,
    terminal: bool,
}

#[derive(Debug, Default)]
pub struct Trie {
    root: Node,
}

impl Trie {
    pub fn from_words<S: AsRef<str>>(words: &[S]) -> Self {
        let mut trie = Trie::default();
        for word in words {
            trie.insert(word.as_ref());
        }
        trie
    }

    pub fn insert(&mut self, word: &str) {
        let mut node = &mut self.root;
        for ch in word.chars() {
            node = node.children.entry(ch).or_default();
        }
        node.terminal = true;
    }

    pub fn contains(&self, word: &str) -> bool {
        self.descend(word).is_some_and(|node| node.terminal)
    }

    pub fn has_prefix(&self, prefix: &str) -> bool {
        self.descend(prefix).is_some()
    }

    pub fn complete(&self, prefix: &str) -> Vec<String> {
        let mut words = Vec::new();
        if let Some(node) = self.descend(prefix) {
            collect(node, &mut prefix.to_string(), &mut words);
        }
        words
    }

    fn descend(&self, prefix: &str) -> Option<&Node> {
        let mut node = &self.root;
        for ch in prefix.chars() {
            node = node.children.get(&ch)?;
        }
        Some(node)
    }
}

fn collect(node: &Node, prefix: &mut String, out: &mut Vec<String>) {
    if node.terminal {
        out.push(prefix.clone());
    }
    for (ch, child) in &node.children {
        prefix.push(*ch);
        collect(child, prefix, out);
        prefix.pop();
    }
}

/// Query string carried by the working collection, one code point per slot.
pub fn query_collection(word: &str) -> Vec<i64> {
    word.chars().map(|ch| i64::from(u32::from(ch))).collect()
}

pub fn query_text(collection: &[i64]) -> String {
    collection
        .iter()
        .filter_map(|&code| u32::try_from(code).ok().and_then(char::from_u32))
        .collect()
}

pub fn search(collection: &[i64], params: &Params) -> Trace {
    walk_query(collection, params, QueryMode::Exact)
}

pub fn starts_with(collection: &[i64], params: &Params) -> Trace {
    walk_query(collection, params, QueryMode::Prefix)
}

pub fn autocomplete(collection: &[i64], params: &Params) -> Trace {
    walk_query(collection, params, QueryMode::Complete)
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum QueryMode {
    Exact,
    Prefix,
    Complete,
}

fn walk_query(collection: &[i64], params: &Params, mode: QueryMode) -> Trace {
    let trie = Trie::from_words(&params.dictionary);
    let query = query_text(collection);
    let mut rec = Recorder::new(collection);
    let mut node = &trie.root;

    for (pos, ch) in query.chars().enumerate() {
        match node.children.get(&ch) {
            Some(child) => {
                rec.visit(pos, i64::from(u32::from(ch)), format!("descend '{ch}'"));
                node = child;
            }
            None => {
                rec.record(
                    Step::new(StepKind::Probe, format!("no child '{ch}'"))
                        .highlight(vec![pos])
                        .counts(1, 1),
                );
                let outcome = match mode {
                    QueryMode::Complete => Outcome::Words(Vec::new()),
                    _ => Outcome::NotFound,
                };
                return rec.finish(outcome);
            }
        }
    }

    let last = query.chars().count().saturating_sub(1);
    match mode {
        QueryMode::Exact if node.terminal => rec.finish(Outcome::Found { index: last }),
        QueryMode::Exact => rec.finish(Outcome::NotFound),
        QueryMode::Prefix => rec.finish(Outcome::Found { index: last }),
        QueryMode::Complete => {
            let mut words = Vec::new();
            collect(node, &mut query.clone(), &mut words);
            for word in &words {
                rec.record(Step::new(StepKind::Visit, format!("collect '{word}'")));
            }
            rec.finish(Outcome::Words(words))
        }
    }
}
