//! Wire-level description of the SVGA 2.x container.

pub mod schema;
pub mod signature;
