/// Valley system version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Room label used by callers to mean "no room filter".
pub const ALL_ROOMS: &str = "all";

/// Number of bundles in the Community Center catalogue.
pub const CATALOGUE_BUNDLE_COUNT: usize = 30;

/// Rooms of the Community Center, in catalogue order.
pub const CATALOGUE_ROOMS: [&str; 6] = [
    "Pantry",
    "Crafts Room",
    "Fish Tank",
    "Boiler Room",
    "Bulletin Board",
    "Vault",
];

/// Span names shared by the sync engine and the tracing setup.
pub mod span_names {
    pub const LOAD: &str = "valley.load";
    pub const UPDATE: &str = "valley.update";
    pub const HEALTH: &str = "valley.health";
}
