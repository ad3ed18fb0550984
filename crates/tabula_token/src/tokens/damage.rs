//! `DAMAGE:<dice>` on equipment.

use tabula_foundation::{Dice, EntityId, Error, ObjectType, Result, Value};
use tabula_storage::{ObjectStore, ScalarKey};

use crate::edit::Edit;
use crate::token::PrimaryToken;

/// Weapon damage. The value is checked as a dice expression and stored in
/// canonical form, replacing any earlier damage.
#[derive(Debug)]
pub struct DamageToken {
    token_type: ObjectType,
}

impl DamageToken {
    #[allow(missing_docs)]
    #[must_use]
    pub fn new() -> Self {
        Self {
            token_type: ObjectType::EQUIPMENT,
        }
    }
}

impl Default for DamageToken {
    fn default() -> Self {
        Self::new()
    }
}

impl PrimaryToken for DamageToken {
    fn name(&self) -> &str {
        "DAMAGE"
    }

    fn token_type(&self) -> &ObjectType {
        &self.token_type
    }

    fn separator(&self) -> char {
        '|'
    }

    fn parse(&self, _store: &mut ObjectStore, _entity: EntityId, value: &str) -> Result<Edit> {
        let dice: Dice = value
            .parse()
            .map_err(|_| Error::parse_conflict(self.name(), "expected dice such as 1d8+1", value))?;
        Ok(Edit::Scalar {
            key: ScalarKey::DAMAGE,
            value: Some(Value::text(&dice.to_string())),
        })
    }

    fn unparse(&self, store: &ObjectStore, entity: EntityId) -> Result<Option<Vec<String>>> {
        Ok(store
            .scalar(entity, ScalarKey::DAMAGE)?
            .map(|damage| vec![damage.to_string()]))
    }
}
