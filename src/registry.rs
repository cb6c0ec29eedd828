//! Topic registry: maps each topic to its generator, starting parameters and
//! the layout used to draw its working collection.

use crate::algorithms::{
    backtracking, dynamic, graph, hashing, heap, linked_list, searching, sorting, tree, trie,
    HeapOrder, PivotStrategy,
};
use crate::error::{StepperError, StepperResult};
use crate::trace::{StepGenerator, Trace};
use crate::utils::random_collection::random_collection;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Topic {
    BubbleSort,
    SelectionSort,
    InsertionSort,
    QuickSort,
    MergeSort,
    LinearSearch,
    BinarySearch,
    PairSum,
    BreadthFirst,
    DepthFirst,
    InOrder,
    PreOrder,
    PostOrder,
    LevelOrder,
    BstLookup,
    HeapInsert,
    HeapExtract,
    HeapBuild,
    NQueens,
    TrieSearch,
    TriePrefix,
    TrieAutocomplete,
    Fibonacci,
    FibonacciMemo,
    CoinChange,
    LinkedList,
    HashInsert,
    HashSearch,
    HashDelete,
}

impl Topic {
    pub const ALL: [Topic; 29] = [
        Topic::BubbleSort,
        Topic::SelectionSort,
        Topic::InsertionSort,
        Topic::QuickSort,
        Topic::MergeSort,
        Topic::LinearSearch,
        Topic::BinarySearch,
        Topic::PairSum,
        Topic::BreadthFirst,
        Topic::DepthFirst,
        Topic::InOrder,
        Topic::PreOrder,
        Topic::PostOrder,
        Topic::LevelOrder,
        Topic::BstLookup,
        Topic::HeapInsert,
        Topic::HeapExtract,
        Topic::HeapBuild,
        Topic::NQueens,
        Topic::TrieSearch,
        Topic::TriePrefix,
        Topic::TrieAutocomplete,
        Topic::Fibonacci,
        Topic::FibonacciMemo,
        Topic::CoinChange,
        Topic::LinkedList,
        Topic::HashInsert,
        Topic::HashSearch,
        Topic::HashDelete,
    ];

    pub fn spec(self) -> &'static TopicSpec {
        &SPECS[self as usize]
    }

    pub fn name(self) -> &'static str {
        self.spec().name
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Topic {
    type Err = StepperError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        Topic::ALL
            .iter()
            .copied()
            .find(|topic| topic.name() == wanted)
            .ok_or_else(|| StepperError::UnknownTopic(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Layout {
    Bars,
    Boxes,
    Graph,
    Tree,
    Board,
    Table,
    Word,
}

/// What the sink does when a trace runs to completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    ResolveAll,
    KeepResolved,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Params {
    pub target: i64,
    pub pivot: PivotStrategy,
    pub board_size: usize,
    pub heap_order: HeapOrder,
    pub value: i64,
    pub word: String,
    pub dictionary: Vec<String>,
    pub n: usize,
    pub coins: Vec<i64>,
    pub amount: usize,
    pub start: usize,
    /// Key/value pairs inserted, in order, by the hash map topics.
    pub entries: Vec<(String, String)>,
}

impl Default for Params {
    fn default() -> Self {
        Params {
            target: 23,
            pivot: PivotStrategy::Last,
            board_size: 4,
            heap_order: HeapOrder::Max,
            value: 85,
            word: "apple".to_string(),
            dictionary: trie::DEFAULT_WORDS.iter().map(|w| w.to_string()).collect(),
            n: 6,
            coins: vec![1, 2, 5],
            amount: 11,
            start: 0,
            entries: hashing::default_entries(),
        }
    }
}

impl Params {
    pub fn for_topic(topic: Topic) -> Self {
        let mut params = Params::default();
        match topic {
            Topic::LinearSearch => params.target = 42,
            Topic::PairSum => params.target = 16,
            Topic::BstLookup => params.target = 5,
            Topic::TriePrefix => params.word = "ap".to_string(),
            Topic::TrieAutocomplete => params.word = "app".to_string(),
            Topic::HashSearch => params.word = "role".to_string(),
            Topic::HashDelete => params.word = "city".to_string(),
            _ => {}
        }
        params
    }

    /// Brings every parameter into the range the topic accepts. Generators are
    /// only ever called with clamped parameters.
    pub fn clamped(mut self, topic: Topic) -> Self {
        self.board_size = self
            .board_size
            .clamp(backtracking::MIN_BOARD, backtracking::MAX_BOARD);
        let max_n = match topic {
            Topic::Fibonacci => 20,
            _ => 90,
        };
        self.n = self.n.min(max_n);
        self.amount = self.amount.min(200);
        self.coins.retain(|&coin| coin > 0);
        self.coins.sort_unstable();
        self.coins.dedup();
        if self.start >= graph::node_count() {
            self.start = 0;
        }
        self.word = self.word.trim().to_string();
        self.dictionary.retain(|word| !word.trim().is_empty());
        if self.dictionary.is_empty() {
            self.dictionary = trie::DEFAULT_WORDS.iter().map(|w| w.to_string()).collect();
        }
        self.entries = self
            .entries
            .into_iter()
            .map(|(key, value)| (key.trim().to_string(), value))
            .filter(|(key, _)| !key.is_empty())
            .collect();
        self
    }
}

pub struct TopicSpec {
    pub topic: Topic,
    pub name: &'static str,
    pub title: &'static str,
    pub time: &'static str,
    pub space: &'static str,
    pub layout: Layout,
    pub completion: Completion,
    /// An empty trace still ends in "not found".
    pub search: bool,
    pub needs_sorted: bool,
    /// Whether a user-supplied collection is meaningful for this topic.
    pub accepts_input: bool,
    seed: fn(&Params, &mut StdRng, usize) -> Vec<i64>,
    generator: StepGenerator,
}

impl TopicSpec {
    pub fn generate(&self, collection: &[i64], params: &Params) -> Trace {
        (self.generator)(collection, params)
    }

    /// Fresh working collection: canned for most topics, random for sorts.
    pub fn seed_collection(&self, params: &Params, rng: &mut StdRng, size: usize) -> Vec<i64> {
        (self.seed)(params, rng, size)
    }

    /// Rejects a user-supplied collection the topic cannot run on.
    pub fn check_input(&self, collection: &[i64]) -> StepperResult<()> {
        if !self.accepts_input {
            return Err(StepperError::InvalidInput(format!(
                "{} builds its own collection; use its parameters instead of --input",
                self.name
            )));
        }
        if self.layout == Layout::Graph && collection.len() != graph::node_count() {
            return Err(StepperError::InvalidInput(format!(
                "{} walks a fixed {}-node graph, got {} values",
                self.name,
                graph::node_count(),
                collection.len()
            )));
        }
        Ok(())
    }

    pub fn prepare_collection(&self, mut collection: Vec<i64>) -> Vec<i64> {
        if self.needs_sorted {
            collection.sort_unstable();
        }
        collection
    }
}

fn seed_random(_: &Params, rng: &mut StdRng, size: usize) -> Vec<i64> {
    random_collection(rng, size)
}

fn seed_linear(_: &Params, _: &mut StdRng, _: usize) -> Vec<i64> {
    vec![15, 7, 23, 42, 8, 31, 19, 5]
}

fn seed_binary(_: &Params, _: &mut StdRng, _: usize) -> Vec<i64> {
    vec![2, 5, 8, 12, 16, 23, 38, 45, 56, 67, 78]
}

fn seed_pairs(_: &Params, _: &mut StdRng, _: usize) -> Vec<i64> {
    vec![1, 3, 5, 7, 9, 11, 13, 15]
}

fn seed_graph(_: &Params, _: &mut StdRng, _: usize) -> Vec<i64> {
    (0..graph::node_count() as i64).collect()
}

fn seed_tree(_: &Params, _: &mut StdRng, _: usize) -> Vec<i64> {
    vec![4, 2, 6, 1, 3, 5, 7]
}

fn seed_heap(params: &Params, _: &mut StdRng, _: usize) -> Vec<i64> {
    match params.heap_order {
        HeapOrder::Max => vec![90, 80, 70, 60, 50, 40, 30],
        HeapOrder::Min => vec![30, 40, 50, 60, 70, 80, 90],
    }
}

fn seed_board(params: &Params, _: &mut StdRng, _: usize) -> Vec<i64> {
    backtracking::empty_board(params.board_size)
}

fn seed_query(params: &Params, _: &mut StdRng, _: usize) -> Vec<i64> {
    trie::query_collection(&params.word)
}

fn seed_call_histogram(params: &Params, _: &mut StdRng, _: usize) -> Vec<i64> {
    vec![0; params.n + 1]
}

fn seed_memo(params: &Params, _: &mut StdRng, _: usize) -> Vec<i64> {
    vec![dynamic::UNSET; params.n + 1]
}

fn seed_list(_: &Params, _: &mut StdRng, _: usize) -> Vec<i64> {
    vec![10, 20, 30, 40]
}

fn seed_empty_table(_: &Params, _: &mut StdRng, _: usize) -> Vec<i64> {
    vec![0; hashing::BUCKETS]
}

fn seed_filled_table(params: &Params, _: &mut StdRng, _: usize) -> Vec<i64> {
    hashing::HashTable::from_entries(&params.entries).chain_lengths()
}

fn seed_dp_row(params: &Params, _: &mut StdRng, _: usize) -> Vec<i64> {
    vec![dynamic::UNREACHABLE; params.amount + 1]
}

macro_rules! sort_spec {
    ($topic:ident, $name:literal, $title:literal, $time:literal, $space:literal, $gen:path) => {
        TopicSpec {
            topic: Topic::$topic,
            name: $name,
            title: $title,
            time: $time,
            space: $space,
            layout: Layout::Bars,
            completion: Completion::ResolveAll,
            search: false,
            needs_sorted: false,
            accepts_input: true,
            seed: seed_random,
            generator: $gen,
        }
    };
}

macro_rules! traversal_spec {
    ($topic:ident, $name:literal, $title:literal, $layout:ident, $seed:path, $gen:path) => {
        TopicSpec {
            topic: Topic::$topic,
            name: $name,
            title: $title,
            time: "O(V + E)",
            space: "O(V)",
            layout: Layout::$layout,
            completion: Completion::KeepResolved,
            search: false,
            needs_sorted: false,
            accepts_input: true,
            seed: $seed,
            generator: $gen,
        }
    };
}

static SPECS: [TopicSpec; 29] = [
    sort_spec!(BubbleSort, "bubble-sort", "Bubble Sort", "O(n²)", "O(1)", sorting::bubble_sort),
    sort_spec!(SelectionSort, "selection-sort", "Selection Sort", "O(n²)", "O(1)", sorting::selection_sort),
    sort_spec!(InsertionSort, "insertion-sort", "Insertion Sort", "O(n²)", "O(1)", sorting::insertion_sort),
    sort_spec!(QuickSort, "quick-sort", "Quick Sort", "O(n log n)", "O(log n)", sorting::quick_sort),
    sort_spec!(MergeSort, "merge-sort", "Merge Sort", "O(n log n)", "O(n)", sorting::merge_sort),
    TopicSpec {
        topic: Topic::LinearSearch,
        name: "linear-search",
        title: "Linear Search",
        time: "O(n)",
        space: "O(1)",
        layout: Layout::Boxes,
        completion: Completion::KeepResolved,
        search: true,
        needs_sorted: false,
        accepts_input: true,
        seed: seed_linear,
        generator: searching::linear_search,
    },
    TopicSpec {
        topic: Topic::BinarySearch,
        name: "binary-search",
        title: "Binary Search",
        time: "O(log n)",
        space: "O(1)",
        layout: Layout::Boxes,
        completion: Completion::KeepResolved,
        search: true,
        needs_sorted: true,
        accepts_input: true,
        seed: seed_binary,
        generator: searching::binary_search,
    },
    TopicSpec {
        topic: Topic::PairSum,
        name: "pair-sum",
        title: "Two Pointers: Pair Sum",
        time: "O(n)",
        space: "O(1)",
        layout: Layout::Boxes,
        completion: Completion::KeepResolved,
        search: true,
        needs_sorted: true,
        accepts_input: true,
        seed: seed_pairs,
        generator: searching::pair_sum,
    },
    traversal_spec!(BreadthFirst, "bfs", "Breadth-First Search", Graph, seed_graph, graph::breadth_first),
    traversal_spec!(DepthFirst, "dfs", "Depth-First Search", Graph, seed_graph, graph::depth_first),
    traversal_spec!(InOrder, "inorder", "In-order Traversal", Tree, seed_tree, tree::in_order),
    traversal_spec!(PreOrder, "preorder", "Pre-order Traversal", Tree, seed_tree, tree::pre_order),
    traversal_spec!(PostOrder, "postorder", "Post-order Traversal", Tree, seed_tree, tree::post_order),
    traversal_spec!(LevelOrder, "level-order", "Level-order Traversal", Tree, seed_tree, tree::level_order),
    TopicSpec {
        topic: Topic::BstLookup,
        name: "bst-lookup",
        title: "Binary Search Tree Lookup",
        time: "O(h)",
        space: "O(1)",
        layout: Layout::Tree,
        completion: Completion::KeepResolved,
        search: true,
        needs_sorted: false,
        accepts_input: true,
        seed: seed_tree,
        generator: tree::bst_lookup,
    },
    TopicSpec {
        topic: Topic::HeapInsert,
        name: "heap-insert",
        title: "Heap Insert (sift up)",
        time: "O(log n)",
        space: "O(1)",
        layout: Layout::Tree,
        completion: Completion::KeepResolved,
        search: false,
        needs_sorted: false,
        accepts_input: false,
        seed: seed_heap,
        generator: heap::insert,
    },
    TopicSpec {
        topic: Topic::HeapExtract,
        name: "heap-extract",
        title: "Heap Extract Root (sift down)",
        time: "O(log n)",
        space: "O(1)",
        layout: Layout::Tree,
        completion: Completion::KeepResolved,
        search: false,
        needs_sorted: false,
        accepts_input: false,
        seed: seed_heap,
        generator: heap::extract_root,
    },
    TopicSpec {
        topic: Topic::HeapBuild,
        name: "heap-build",
        title: "Build Heap (heapify)",
        time: "O(n)",
        space: "O(1)",
        layout: Layout::Tree,
        completion: Completion::ResolveAll,
        search: false,
        needs_sorted: false,
        accepts_input: true,
        seed: seed_random,
        generator: heap::build,
    },
    TopicSpec {
        topic: Topic::NQueens,
        name: "n-queens",
        title: "Backtracking: N-Queens",
        time: "O(n!)",
        space: "O(n)",
        layout: Layout::Board,
        completion: Completion::KeepResolved,
        search: false,
        needs_sorted: false,
        accepts_input: false,
        seed: seed_board,
        generator: backtracking::n_queens,
    },
    TopicSpec {
        topic: Topic::TrieSearch,
        name: "trie-search",
        title: "Trie: Exact Search",
        time: "O(m)",
        space: "O(1)",
        layout: Layout::Word,
        completion: Completion::KeepResolved,
        search: true,
        needs_sorted: false,
        accepts_input: false,
        seed: seed_query,
        generator: trie::search,
    },
    TopicSpec {
        topic: Topic::TriePrefix,
        name: "trie-prefix",
        title: "Trie: Starts With",
        time: "O(m)",
        space: "O(1)",
        layout: Layout::Word,
        completion: Completion::KeepResolved,
        search: true,
        needs_sorted: false,
        accepts_input: false,
        seed: seed_query,
        generator: trie::starts_with,
    },
    TopicSpec {
        topic: Topic::TrieAutocomplete,
        name: "trie-autocomplete",
        title: "Trie: Autocomplete",
        time: "O(m + k)",
        space: "O(k)",
        layout: Layout::Word,
        completion: Completion::KeepResolved,
        search: false,
        needs_sorted: false,
        accepts_input: false,
        seed: seed_query,
        generator: trie::autocomplete,
    },
    TopicSpec {
        topic: Topic::Fibonacci,
        name: "fibonacci",
        title: "Fibonacci (naive recursion)",
        time: "O(2ⁿ)",
        space: "O(n)",
        layout: Layout::Table,
        completion: Completion::KeepResolved,
        search: false,
        needs_sorted: false,
        accepts_input: false,
        seed: seed_call_histogram,
        generator: dynamic::fibonacci_naive,
    },
    TopicSpec {
        topic: Topic::FibonacciMemo,
        name: "fibonacci-memo",
        title: "Fibonacci (memoized)",
        time: "O(n)",
        space: "O(n)",
        layout: Layout::Table,
        completion: Completion::KeepResolved,
        search: false,
        needs_sorted: false,
        accepts_input: false,
        seed: seed_memo,
        generator: dynamic::fibonacci_memo,
    },
    TopicSpec {
        topic: Topic::CoinChange,
        name: "coin-change",
        title: "Coin Change (tabulation)",
        time: "O(amount × coins)",
        space: "O(amount)",
        layout: Layout::Table,
        completion: Completion::KeepResolved,
        search: false,
        needs_sorted: false,
        accepts_input: false,
        seed: seed_dp_row,
        generator: dynamic::coin_change,
    },
    TopicSpec {
        topic: Topic::LinkedList,
        name: "linked-list",
        title: "Linked List Traversal",
        time: "O(n)",
        space: "O(1)",
        layout: Layout::Boxes,
        completion: Completion::KeepResolved,
        search: false,
        needs_sorted: false,
        accepts_input: true,
        seed: seed_list,
        generator: linked_list::traverse,
    },
    TopicSpec {
        topic: Topic::HashInsert,
        name: "hash-insert",
        title: "Hash Map: Insert with Chaining",
        time: "O(1) average",
        space: "O(n)",
        layout: Layout::Table,
        completion: Completion::KeepResolved,
        search: false,
        needs_sorted: false,
        accepts_input: false,
        seed: seed_empty_table,
        generator: hashing::insert,
    },
    TopicSpec {
        topic: Topic::HashSearch,
        name: "hash-search",
        title: "Hash Map: Search",
        time: "O(1) average",
        space: "O(1)",
        layout: Layout::Table,
        completion: Completion::KeepResolved,
        search: true,
        needs_sorted: false,
        accepts_input: false,
        seed: seed_filled_table,
        generator: hashing::search,
    },
    TopicSpec {
        topic: Topic::HashDelete,
        name: "hash-delete",
        title: "Hash Map: Delete",
        time: "O(1) average",
        space: "O(1)",
        layout: Layout::Table,
        completion: Completion::KeepResolved,
        search: true,
        needs_sorted: false,
        accepts_input: false,
        seed: seed_filled_table,
        generator: hashing::delete,
    },
];

impl Params {
    /// One-line summary of the parameters the topic actually reads.
    pub fn describe(&self, topic: Topic) -> String {
        match topic {
            Topic::LinearSearch | Topic::BinarySearch | Topic::BstLookup => {
                format!("target = {}", self.target)
            }
            Topic::PairSum => format!("target sum = {}", self.target),
            Topic::QuickSort => format!("pivot = {}", self.pivot),
            Topic::BreadthFirst | Topic::DepthFirst => format!("start node = {}", self.start),
            Topic::HeapInsert => format!("{} heap, insert {}", self.heap_order, self.value),
            Topic::HeapExtract | Topic::HeapBuild => format!("{} heap", self.heap_order),
            Topic::NQueens => format!("board {0}x{0}", self.board_size),
            Topic::TrieSearch | Topic::TriePrefix | Topic::TrieAutocomplete => format!(
                "query '{}' over {} words",
                self.word,
                self.dictionary.len()
            ),
            Topic::Fibonacci | Topic::FibonacciMemo => format!("n = {}", self.n),
            Topic::CoinChange => format!("coins {:?}, amount {}", self.coins, self.amount),
            Topic::HashInsert => format!(
                "{} entries into {} buckets",
                self.entries.len(),
                hashing::BUCKETS
            ),
            Topic::HashSearch | Topic::HashDelete => {
                format!("key '{}' over {} entries", self.word, self.entries.len())
            }
            _ => "no parameters".to_string(),
        }
    }
}
