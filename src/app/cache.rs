//! TTL cache for backend snapshots.
//!
//! One cache abstraction keyed by (resource kind, market id) replaces ad hoc
//! per-call-site TTL constants. Entries are invalidated explicitly on trade
//! success; quotes are never cached.

use std::collections::HashMap;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::time::Instant;

use crate::domain::{ExclusiveMarketInfo, MarketId, OptionMarketInfo, TradeHistory};

/// What kind of snapshot an entry holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    OptionMarkets,
    ExclusiveMarket,
    TradeHistory,
}

/// A cached snapshot value.
#[derive(Debug, Clone)]
pub enum Snapshot {
    OptionMarkets(Vec<OptionMarketInfo>),
    ExclusiveMarket(ExclusiveMarketInfo),
    TradeHistory(TradeHistory),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    resource: ResourceKind,
    market: MarketId,
}

struct Entry {
    inserted_at: Instant,
    snapshot: Snapshot,
}

/// Snapshot cache with a single TTL and explicit per-market invalidation.
pub struct SnapshotCache {
    ttl: Duration,
    entries: Mutex<HashMap<CacheKey, Entry>>,
}

impl SnapshotCache {
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Fresh entry for (resource, market), if any.
    pub fn get(&self, resource: ResourceKind, market: &MarketId) -> Option<Snapshot> {
        let entries = self.entries.lock();
        let entry = entries.get(&CacheKey {
            resource,
            market: market.clone(),
        })?;
        if entry.inserted_at.elapsed() > self.ttl {
            return None;
        }
        Some(entry.snapshot.clone())
    }

    pub fn insert(&self, resource: ResourceKind, market: &MarketId, snapshot: Snapshot) {
        self.entries.lock().insert(
            CacheKey {
                resource,
                market: market.clone(),
            },
            Entry {
                inserted_at: Instant::now(),
                snapshot,
            },
        );
    }

    /// Drop every entry for a market. Called on every successful trade; the
    /// next read re-fetches from the backend.
    pub fn invalidate_market(&self, market: &MarketId) {
        self.entries.lock().retain(|key, _| &key.market != market);
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}
