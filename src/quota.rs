use dashmap::DashMap;

// Outcome of a single admission check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Admission {
    pub allowed: bool,
    pub remaining: u32,
}

// Per-client admission gate. Maps a client identifier (remote IP) to the
// number of requests it has been granted over the process lifetime.
// Entries are never decremented or removed; a restart resets all quotas.
pub struct QuotaGate {
    counters: DashMap<String, u32>,
    limit: u32,
}

impl QuotaGate {
    pub fn new(limit: u32) -> Self {
        Self {
            counters: DashMap::new(),
            limit,
        }
    }

    // Check-then-increment for one client. The DashMap entry guard keeps
    // the read-modify-write atomic across worker threads, so a client can
    // never be granted more than `limit` requests.
    pub fn check_and_increment(&self, client_id: &str) -> Admission {
        let mut count = self.counters.entry(client_id.to_string()).or_insert(0);

        if *count >= self.limit {
            return Admission {
                allowed: false,
                remaining: 0,
            };
        }

        *count += 1;
        Admission {
            allowed: true,
            remaining: self.limit - *count,
        }
    }

    // Number of distinct clients seen so far
    pub fn tracked_clients(&self) -> usize {
        self.counters.len()
    }

    pub fn count(&self, client_id: &str) -> u32 {
        self.counters.get(client_id).map(|c| *c).unwrap_or(0)
    }
}
