use std::ops::{Add, AddAssign, Mul, Sub};

use astra_serde::{ByteReader, ByteWriter, Serde, SerdeErr};

/// A 2D vector with f64 components, the spatial unit of the simulation
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn length_sq(&self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    pub fn length(&self) -> f64 {
        self.length_sq().sqrt()
    }

    pub fn normalize(&self) -> Self {
        let len = self.length();
        if len == 0.0 {
            Self::ZERO
        } else {
            Self::new(self.x / len, self.y / len)
        }
    }

    pub fn dist_sq(a: Vec2, b: Vec2) -> f64 {
        let dx = a.x - b.x;
        let dy = a.y - b.y;
        dx * dx + dy * dy
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vec2 {
    type Output = Vec2;

    fn mul(self, rhs: f64) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

impl Serde for Vec2 {
    fn ser(&self, writer: &mut ByteWriter) {
        writer.write_f64(self.x);
        writer.write_f64(self.y);
    }

    fn de(reader: &mut ByteReader) -> Result<Self, SerdeErr> {
        let x = reader.read_f64()?;
        let y = reader.read_f64()?;
        Ok(Self::new(x, y))
    }
}

/// Circle-circle overlap test between two centers with the given radii
pub fn circles_overlap(a: Vec2, radius_a: f64, b: Vec2, radius_b: f64) -> bool {
    let reach = radius_a + radius_b;
    Vec2::dist_sq(a, b) <= reach * reach
}
