//! Response bodies whose shape the frontend depends on. Mutation responses
//! carry the same record shape the SSE channel broadcasts, so a tab can
//! treat both sources identically.

pub(crate) mod reservation;
