//! Organisms and the id allocator that names them

use serde::{Deserialize, Serialize};

use crate::core::types::{OrganismId, Role, Vec2};
use crate::genetics::Phenotype;

/// One simulated agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Organism {
    pub id: OrganismId,
    /// Only used for rendering
    #[serde(flatten)]
    pub position: Vec2,
    #[serde(flatten)]
    pub phenotype: Phenotype,
    pub alive: bool,
    pub role: Role,
}

impl Organism {
    /// A living organism
    pub fn new(id: OrganismId, role: Role, position: Vec2, phenotype: Phenotype) -> Self {
        Self {
            id,
            position,
            phenotype,
            alive: true,
            role,
        }
    }

    pub fn is_prey(&self) -> bool {
        self.role == Role::Prey
    }

    pub fn is_predator(&self) -> bool {
        self.role == Role::Predator
    }
}

/// Hands out strictly increasing organism ids
///
/// Owned by the engine for the whole simulation lifetime, so ids are never
/// reused across generations or lab re-initialisations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdAllocator {
    next: u64,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> OrganismId {
        let id = OrganismId(self.next);
        self.next += 1;
        id
    }

    /// Id the next call will return
    pub fn peek(&self) -> OrganismId {
        OrganismId(self.next)
    }
}

/// Living organisms with the given role
pub fn count_alive(organisms: &[Organism], role: Role) -> usize {
    organisms.iter().filter(|o| o.alive && o.role == role).count()
}
