//! Core price engine.
//!
//! This crate contains pure value arithmetic with ZERO web or database
//! dependencies. Prices are exact decimals tagged with a currency code; they
//! only become rounded when asked for their payable amount.
//!
//! # Modules
//!
//! - `price` - Price arithmetic, payable rounding, splitting, charges

pub mod price;
