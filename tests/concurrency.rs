use std::ffi::c_void;
use std::thread;

use alloc_hooks::{AccountingDomain, CountingAllocator, Libc, SizeHeader};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const THREADS: u64 = 8;
const ROUNDS: usize = 5_000;

struct Block(*mut c_void);

// Blocks are handed back to the spawning thread for release.
unsafe impl Send for Block {}

#[test]
fn concurrent_traffic_converges() {
    let domain = AccountingDomain::new("stress", "explicit/stress", "");
    let alloc = CountingAllocator::<SizeHeader, _>::new(&domain, Libc);

    let kept: Vec<(Vec<Block>, usize)> = thread::scope(|s| {
        let workers: Vec<_> = (0..THREADS)
            .map(|seed| {
                let alloc = &alloc;
                s.spawn(move || {
                    let mut rng = StdRng::seed_from_u64(seed);
                    let mut kept = Vec::new();
                    let mut kept_bytes = 0;

                    for round in 0..ROUNDS {
                        let size = rng.gen_range(0..1024);
                        unsafe {
                            let ptr = alloc.malloc(size);
                            assert!(!ptr.is_null());
                            if round % 100 == 0 {
                                kept.push(Block(ptr));
                                kept_bytes += size;
                            } else {
                                let ptr = alloc.realloc(ptr, rng.gen_range(1..2048));
                                alloc.free(ptr);
                            }
                        }
                    }
                    (kept, kept_bytes)
                })
            })
            .collect();

        workers.into_iter().map(|w| w.join().unwrap()).collect()
    });

    let expected: usize = kept.iter().map(|(_, bytes)| bytes).sum();
    assert_eq!(domain.allocated_bytes(), expected);

    let stats = domain.stats();
    assert_eq!(stats.allocations, THREADS * ROUNDS as u64);
    assert!(stats.peak_bytes >= expected);

    for (blocks, _) in kept {
        for Block(ptr) in blocks {
            unsafe { alloc.free(ptr) };
        }
    }
    assert_eq!(domain.allocated_bytes(), 0);
}

#[test]
fn counter_is_readable_while_allocating() {
    let domain = AccountingDomain::new("sampled", "explicit/sampled", "");
    let alloc = CountingAllocator::<SizeHeader, _>::new(&domain, Libc);

    thread::scope(|s| {
        let writer = s.spawn(|| {
            for _ in 0..10_000 {
                unsafe {
                    let ptr = alloc.malloc(4096);
                    alloc.free(ptr);
                }
            }
        });

        while !writer.is_finished() {
            let sample = domain.allocated_bytes();
            assert!(sample == 0 || sample == 4096, "torn read: {sample}");
        }
    });

    assert_eq!(domain.allocated_bytes(), 0);
}
