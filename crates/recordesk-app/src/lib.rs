// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod cards;
pub mod ids;
pub mod modal;
pub mod model;
pub mod state;
pub mod store;
pub mod view;

pub use cards::*;
pub use ids::*;
pub use modal::*;
pub use model::*;
pub use state::*;
pub use store::*;
pub use view::*;
