// The benchmarks drive an OrdHashMap and a std BTreeMap with the same
// workload, so each pair of results can be compared directly. All of them use
// Bencher::iter_batched to keep key generation and pre-filling out of the
// measurement.
// Keys are random byte strings without the reserved 0xFF byte. Their leading
// bytes are uniform, which is the case the ordered hash is designed for; the
// clustered search shows what happens when that does not hold.
// Counts are chosen at random from constant ranges so that no single count
// gets lucky with a particular cache size.

extern crate criterion;
extern crate ordhash;
extern crate rand;

use std::collections::BTreeMap;

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use ordhash::{OrdHashMap, OrdHashMapBuilder};
use rand::seq::{IndexedRandom, SliceRandom};
use rand::Rng;

const CAPACITY: usize = 1 << 14;
// ranges of counts (MINs are inclusive, MAXes exclusive):
const INSERT_COUNT_MIN: usize = 10_000;
const INSERT_COUNT_MAX: usize = 12_000;
const SEARCH_COUNT_MIN: usize = 1_000;
const SEARCH_COUNT_MAX: usize = 1_200;
const KEY_LEN: usize = 12;

pub fn insert_ordhash(c: &mut Criterion) {
    c.bench_function("insert_ordhash", |b| {
        b.iter_batched(
            || (new_ordhash(), random_keys(random_count())),
            |(mut map, keys)| {
                for (i, k) in keys.iter().enumerate() {
                    map.put(k, i).expect("Map too small for the workload!");
                }
                map
            },
            BatchSize::SmallInput,
        )
    });
}

pub fn insert_btree(c: &mut Criterion) {
    c.bench_function("insert_btree", |b| {
        b.iter_batched(
            || (BTreeMap::new(), random_keys(random_count())),
            |(mut map, keys)| {
                for (i, k) in keys.into_iter().enumerate() {
                    map.insert(k, i);
                }
                map
            },
            BatchSize::SmallInput,
        )
    });
}

pub fn search_ordhash(c: &mut Criterion) {
    c.bench_function("search_ordhash", |b| {
        b.iter_batched(
            || {
                let keys = random_keys(random_count());
                let search = search_list(&keys);
                (fill_ordhash(&keys), search)
            },
            |(ref map, ref search)| {
                for k in search.iter() {
                    black_box(map.get(black_box(k)));
                }
            },
            BatchSize::SmallInput,
        )
    });
}

pub fn search_btree(c: &mut Criterion) {
    c.bench_function("search_btree", |b| {
        b.iter_batched(
            || {
                let keys = random_keys(random_count());
                let search = search_list(&keys);
                (fill_btree(&keys), search)
            },
            |(ref map, ref search)| {
                for k in search.iter() {
                    black_box(map.get(black_box(k)));
                }
            },
            BatchSize::SmallInput,
        )
    });
}

pub fn remove_ordhash(c: &mut Criterion) {
    c.bench_function("remove_ordhash", |b| {
        b.iter_batched(
            || {
                let keys = random_keys(random_count());
                let remove = shuffled(&keys);
                (fill_ordhash(&keys), remove)
            },
            |(mut map, remove)| {
                for k in remove.iter() {
                    map.remove(k);
                }
                map
            },
            BatchSize::SmallInput,
        )
    });
}

pub fn remove_btree(c: &mut Criterion) {
    c.bench_function("remove_btree", |b| {
        b.iter_batched(
            || {
                let keys = random_keys(random_count());
                let remove = shuffled(&keys);
                (fill_btree(&keys), remove)
            },
            |(mut map, remove)| {
                for k in remove.iter() {
                    map.remove(k);
                }
                map
            },
            BatchSize::SmallInput,
        )
    });
}

pub fn scan_ordhash(c: &mut Criterion) {
    c.bench_function("scan_ordhash", |b| {
        b.iter_batched(
            || fill_ordhash(&random_keys(random_count())),
            |map| map.iter().map(|(k, _)| k.len()).sum::<usize>(),
            BatchSize::SmallInput,
        )
    });
}

pub fn scan_btree(c: &mut Criterion) {
    c.bench_function("scan_btree", |b| {
        b.iter_batched(
            || fill_btree(&random_keys(random_count())),
            |map| map.iter().map(|(k, _)| k.len()).sum::<usize>(),
            BatchSize::SmallInput,
        )
    });
}

// Insert then remove the whole set, both maps end empty.
pub fn full_cycle_ordhash(c: &mut Criterion) {
    c.bench_function("full_cycle_ordhash", |b| {
        b.iter_batched(
            || {
                let keys = random_keys(random_count());
                let remove = shuffled(&keys);
                (new_ordhash(), keys, remove)
            },
            |(mut map, keys, remove)| {
                for (i, k) in keys.iter().enumerate() {
                    map.put(k, i).expect("Map too small for the workload!");
                }
                for k in remove.iter() {
                    map.remove(k);
                }
                debug_assert!(map.is_empty());
                map
            },
            BatchSize::SmallInput,
        )
    });
}

pub fn full_cycle_btree(c: &mut Criterion) {
    c.bench_function("full_cycle_btree", |b| {
        b.iter_batched(
            || {
                let keys = random_keys(random_count());
                let remove = shuffled(&keys);
                (BTreeMap::new(), keys, remove)
            },
            |(mut map, keys, remove)| {
                for (i, k) in keys.into_iter().enumerate() {
                    map.insert(k, i);
                }
                for k in remove.iter() {
                    map.remove(k);
                }
                debug_assert!(map.is_empty());
                map
            },
            BatchSize::SmallInput,
        )
    });
}

// All keys share their first three bytes, so everything lands in a handful
// of buckets and lookups become a linear walk.
pub fn search_ordhash_clustered(c: &mut Criterion) {
    c.bench_function("search_ordhash_clustered", |b| {
        b.iter_batched(
            || {
                let keys: Vec<Vec<u8>> = random_keys(SEARCH_COUNT_MIN)
                    .into_iter()
                    .map(|mut k| {
                        k[..3].copy_from_slice(b"key");
                        k
                    })
                    .collect();
                let search = search_list(&keys);
                let mut map = OrdHashMapBuilder::new()
                    .set_capacity(CAPACITY)
                    .set_overflow(CAPACITY)
                    .build()
                    .expect("Invalid map parameters!");
                for (i, k) in keys.iter().enumerate() {
                    map.put(k, i).expect("Map too small for the workload!");
                }
                (map, search)
            },
            |(ref map, ref search): (OrdHashMap<usize>, Vec<Vec<u8>>)| {
                for k in search.iter() {
                    black_box(map.get(black_box(k)));
                }
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(insert, insert_ordhash, insert_btree);
criterion_group!(search, search_ordhash, search_btree, search_ordhash_clustered);
criterion_group!(remove, remove_ordhash, remove_btree);
criterion_group!(scan, scan_ordhash, scan_btree);
criterion_group!(full_cycle, full_cycle_ordhash, full_cycle_btree);
criterion_main!(insert, search, remove, scan, full_cycle);

// Utility functions:

fn random_count() -> usize {
    rand::rng().random_range(INSERT_COUNT_MIN..INSERT_COUNT_MAX)
}

/// Returns n random keys with no 0xFF byte. Duplicates are possible but
/// vanishingly rare at this key length.
fn random_keys(n: usize) -> Vec<Vec<u8>> {
    let mut rng = rand::rng();
    (0..n)
        .map(|_| (0..KEY_LEN).map(|_| rng.random_range(0..0xFFu8)).collect())
        .collect()
}

/// Half of the searches hit, half miss.
fn search_list(keys: &[Vec<u8>]) -> Vec<Vec<u8>> {
    let mut rng = rand::rng();
    let count = rng.random_range(SEARCH_COUNT_MIN..SEARCH_COUNT_MAX);
    let misses = random_keys(count / 2);
    let mut list: Vec<Vec<u8>> = keys
        .choose_multiple(&mut rng, count - misses.len())
        .cloned()
        .chain(misses)
        .collect();
    list.shuffle(&mut rng);
    list
}

fn shuffled(keys: &[Vec<u8>]) -> Vec<Vec<u8>> {
    let mut list = keys.to_vec();
    list.shuffle(&mut rand::rng());
    list
}

fn new_ordhash() -> OrdHashMap<usize> {
    OrdHashMap::with_capacity(CAPACITY).expect("Invalid map parameters!")
}

fn fill_ordhash(keys: &[Vec<u8>]) -> OrdHashMap<usize> {
    let mut map = new_ordhash();
    for (i, k) in keys.iter().enumerate() {
        map.put(k, i).expect("Map too small for the workload!");
    }
    map
}

fn fill_btree(keys: &[Vec<u8>]) -> BTreeMap<Vec<u8>, usize> {
    keys.iter().cloned().enumerate().map(|(i, k)| (k, i)).collect()
}
