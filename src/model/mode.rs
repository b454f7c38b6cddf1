//! Traversal modes and mode sets

/// Non-transit and transit traversal modes known to the linker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TraverseMode {
    Walk,
    Bicycle,
    Car,
    Transit,
}

/// A set of traversal modes, used both as an edge permission mask and as a
/// query filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModeSet {
    pub walk: bool,
    pub bicycle: bool,
    pub car: bool,
    pub transit: bool,
}

impl ModeSet {
    /// Set containing only the given mode.
    pub fn from_mode(mode: TraverseMode) -> Self {
        let mut set = Self::default();
        set.insert(mode);
        set
    }

    /// All street modes (walk, bicycle, car).
    pub fn all_street() -> Self {
        Self {
            walk: true,
            bicycle: true,
            car: true,
            transit: false,
        }
    }

    pub fn insert(&mut self, mode: TraverseMode) {
        match mode {
            TraverseMode::Walk => self.walk = true,
            TraverseMode::Bicycle => self.bicycle = true,
            TraverseMode::Car => self.car = true,
            TraverseMode::Transit => self.transit = true,
        }
    }

    pub fn contains(&self, mode: TraverseMode) -> bool {
        match mode {
            TraverseMode::Walk => self.walk,
            TraverseMode::Bicycle => self.bicycle,
            TraverseMode::Car => self.car,
            TraverseMode::Transit => self.transit,
        }
    }

    pub fn intersects(&self, other: &ModeSet) -> bool {
        (self.walk && other.walk)
            || (self.bicycle && other.bicycle)
            || (self.car && other.car)
            || (self.transit && other.transit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_mode_contains_only_that_mode() {
        let set = ModeSet::from_mode(TraverseMode::Bicycle);
        assert!(set.contains(TraverseMode::Bicycle));
        assert!(!set.contains(TraverseMode::Walk));
        assert!(!set.contains(TraverseMode::Car));
    }

    #[test]
    fn intersects_requires_a_shared_mode() {
        let walk = ModeSet::from_mode(TraverseMode::Walk);
        let car = ModeSet::from_mode(TraverseMode::Car);
        assert!(!walk.intersects(&car));
        assert!(walk.intersects(&ModeSet::all_street()));
        assert!(car.intersects(&ModeSet::all_street()));
    }
}
