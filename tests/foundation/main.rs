//! Integration tests for Layer 0: Foundation
//!
//! Tests for core types: Value, ObjectType, EntityId, Error, and persistent collections.

mod values;
