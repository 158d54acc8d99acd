// Axum handlers, one submodule per resource.
//
// Every handler takes the pool as state. Reads run on a single pooled
// connection; writes run inside one transaction that `db::finish` commits or
// rolls back.
pub mod games;
pub mod health;
pub mod players;
