//! Domain separators for [`super::hash::canonical_hash`].
//!
//! This module is the only place the separator byte strings are spelled out.
//! Each domain is `FLOWLINE::<NAME>::V1\0`; the trailing NUL keeps a domain
//! from being a prefix of a payload.

macro_rules! hash_domains {
    ($( $(#[$doc:meta])* $variant:ident => $tag:literal ),+ $(,)?) => {
        /// Which artifact a digest is computed over.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum HashDomain {
            $( $(#[$doc])* $variant, )+
        }

        impl HashDomain {
            /// Every domain, in declaration order.
            pub const ALL: &'static [HashDomain] = &[$( Self::$variant ),+];

            /// Separator bytes fed to the hasher ahead of the payload.
            #[must_use]
            pub const fn as_bytes(self) -> &'static [u8] {
                match self {
                    $( Self::$variant => concat!("FLOWLINE::", $tag, "::V1\0").as_bytes(), )+
                }
            }

            /// Variant name, as used in logs.
            #[must_use]
            pub const fn name(self) -> &'static str {
                match self {
                    $( Self::$variant => stringify!($variant), )+
                }
            }
        }
    };
}

hash_domains! {
    /// Canonical state keys (best-leaf fingerprints, error details).
    CanonicalKey => "CANONICAL_KEY",
    /// Canonical JSON of a resolved graph.
    Graph => "GRAPH",
    /// Canonical JSON echo of a search policy.
    SearchPolicy => "SEARCH_POLICY",
    /// Canonical JSON search report.
    SearchReport => "SEARCH_REPORT",
    /// Benchmark regime inputs.
    BenchInput => "BENCH_INPUT",
}

impl std::fmt::Display for HashDomain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
