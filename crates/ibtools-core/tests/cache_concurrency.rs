//! Concurrent access to the utility path cache.
//!
//! Many tasks store, read and invalidate overlapping keys at once; the cache
//! must never panic and must end in a state consistent with the last writes.

use std::sync::Arc;

use ibtools_core::{PlatformType, UtilPathCache, UtilityLocation, UtilityType};

fn location(n: usize) -> UtilityLocation {
    UtilityLocation::new(
        format!("/opt/1cv8/x86_64/8.3.24.{n}/ibcmd"),
        Some(format!("8.3.24.{n}")),
        PlatformType::Linux,
    )
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_stores_and_reads_stay_consistent() {
    let cache = Arc::new(UtilPathCache::new());
    let mut handles = Vec::new();

    for n in 0..64 {
        let cache = Arc::clone(&cache);
        handles.push(tokio::spawn(async move {
            let version = format!("8.3.{}", n % 4);
            cache.store(UtilityType::Ibcmd, Some(&version), location(n));
            let seen = cache.get(UtilityType::Ibcmd, Some(&version));
            // Another task may have overwritten the key, but never removed it.
            assert!(seen.is_some());
            if let Some(seen) = seen {
                assert_eq!(seen.platform(), PlatformType::Linux);
                assert!(seen.version().is_some());
            }
        }));
    }

    for handle in handles {
        handle.await.unwrap();
    }

    assert_eq!(cache.size(), 4);
    let stats = cache.stats();
    assert_eq!(stats.hits, 64);
    assert_eq!(stats.misses, 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn last_writer_wins_for_same_key() {
    let cache = Arc::new(UtilPathCache::new());

    let writers: Vec<_> = (0..16)
        .map(|n| {
            let cache = Arc::clone(&cache);
            tokio::spawn(async move {
                cache.store(UtilityType::Ibsrv, None, location(n));
            })
        })
        .collect();
    for writer in writers {
        writer.await.unwrap();
    }

    let winner = cache.get(UtilityType::Ibsrv, None).unwrap();
    assert_eq!(cache.size(), 1);
    // Whichever store landed last, the entry is one complete location.
    let entry = cache.entry(UtilityType::Ibsrv, None).unwrap();
    assert!(entry.matches(&winner));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn invalidate_and_clear_race_with_readers() {
    let cache = Arc::new(UtilPathCache::new());
    for utility in UtilityType::ALL {
        cache.store(utility, None, location(1));
    }

    let mut handles = Vec::new();
    for utility in UtilityType::ALL {
        let cache = Arc::clone(&cache);
        handles.push(tokio::spawn(async move {
            for _ in 0..100 {
                let _ = cache.get(utility, None);
            }
            cache.invalidate(utility, None);
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    assert_eq!(cache.size(), 0);
    cache.clear();
    assert_eq!(cache.size(), 0);
}
