//! Guild home location

/// Optional home location of a guild: world name, coordinates and
/// orientation. Stored as a nullable column group on the guild row.
#[derive(Debug, Clone, PartialEq)]
pub struct GuildHome {
    pub world: String,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub yaw: f64,
    pub pitch: f64,
}

impl GuildHome {
    pub fn new(world: impl Into<String>, x: f64, y: f64, z: f64) -> Self {
        Self {
            world: world.into(),
            x,
            y,
            z,
            yaw: 0.0,
            pitch: 0.0,
        }
    }

    pub fn with_orientation(mut self, yaw: f64, pitch: f64) -> Self {
        self.yaw = yaw;
        self.pitch = pitch;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_home_builder() {
        let home = GuildHome::new("overworld", 1.0, 64.0, -3.5).with_orientation(90.0, -10.0);
        assert_eq!(home.world, "overworld");
        assert_eq!(home.yaw, 90.0);
        assert_eq!(home.pitch, -10.0);
    }
}
