//! A bottle of liquid: fill it, pour from it, empty it

use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum BottleError {
    #[error("Volume must not be negative: {0}")]
    NegativeVolume(f32),
}

/// A bottle holding up to `capacity` litres
#[derive(Debug, Clone, PartialEq)]
pub struct Bottle {
    /// Litres
    pub capacity: f32,
    /// Litres currently held, never above `capacity`
    pub volume: f32,
    pub material: String,
}

impl Bottle {
    /// An empty one-litre bottle
    pub fn new(material: impl Into<String>) -> Self {
        Self {
            capacity: 1.0,
            volume: 0.0,
            material: material.into(),
        }
    }

    /// Add `volume` litres; whatever does not fit spills
    pub fn fill(&mut self, volume: f32) -> Result<(), BottleError> {
        check_volume(volume)?;
        self.volume = (self.volume + volume).min(self.capacity);
        Ok(())
    }

    /// Pour up to `volume` litres into `target`, limited by what this bottle holds
    pub fn pour_into(&mut self, target: &mut Bottle, volume: f32) -> Result<(), BottleError> {
        check_volume(volume)?;
        let volume = volume.min(self.volume);
        target.fill(volume)?;
        self.volume -= volume;
        Ok(())
    }

    pub fn empty(&mut self) {
        self.volume = 0.0;
    }
}

impl fmt::Display for Bottle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "The {} bottle now has {} liter(s) of water.",
            self.material, self.volume
        )
    }
}

fn check_volume(volume: f32) -> Result<(), BottleError> {
    if volume < 0.0 {
        return Err(BottleError::NegativeVolume(volume));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_bottle_is_empty() {
        let bottle = Bottle::new("plastic");
        assert_eq!(bottle.capacity, 1.0);
        assert_eq!(bottle.volume, 0.0);
        assert_eq!(bottle.material, "plastic");
    }

    #[test]
    fn test_fill_clamps_to_capacity() {
        let mut bottle = Bottle::new("glass");
        bottle.fill(0.25).unwrap();
        assert_eq!(bottle.volume, 0.25);
        bottle.fill(5.0).unwrap();
        assert_eq!(bottle.volume, 1.0);
    }

    #[test]
    fn test_pour_limited_by_held_volume() {
        let mut plastic = Bottle::new("plastic");
        let mut glass = Bottle::new("glass");
        plastic.fill(0.5).unwrap();

        plastic.pour_into(&mut glass, 0.75).unwrap();
        assert_eq!(plastic.volume, 0.0);
        assert_eq!(glass.volume, 0.5);
    }

    #[test]
    fn test_pour_into_full_bottle_spills() {
        let mut plastic = Bottle::new("plastic");
        let mut glass = Bottle::new("glass");
        plastic.fill(0.5).unwrap();
        glass.fill(0.75).unwrap();

        plastic.pour_into(&mut glass, 0.5).unwrap();
        assert_eq!(plastic.volume, 0.0);
        assert_eq!(glass.volume, 1.0);
    }

    #[test]
    fn test_empty() {
        let mut bottle = Bottle::new("glass");
        bottle.fill(1.0).unwrap();
        bottle.empty();
        assert_eq!(bottle.volume, 0.0);
    }

    #[test]
    fn test_negative_volume_rejected() {
        let mut bottle = Bottle::new("glass");
        assert_eq!(bottle.fill(-1.0), Err(BottleError::NegativeVolume(-1.0)));

        let mut other = Bottle::new("plastic");
        assert_eq!(
            bottle.pour_into(&mut other, -0.5),
            Err(BottleError::NegativeVolume(-0.5))
        );
    }

    #[test]
    fn test_display() {
        let mut bottle = Bottle::new("plastic");
        bottle.fill(0.5).unwrap();
        assert_eq!(
            bottle.to_string(),
            "The plastic bottle now has 0.5 liter(s) of water."
        );
    }
}
