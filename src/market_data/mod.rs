// Market data module entrypoint
pub mod adapters;   // vendor-specific fetchers (e.g. Fugle)
pub mod normaliser; // vendor payload -> flat price record
