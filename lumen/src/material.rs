use glam::Vec3;

#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    pub name: String,
    pub base_color: Vec3,
    pub emission: Vec3,
}

impl Material {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_base_color(mut self, base_color: Vec3) -> Self {
        self.base_color = base_color;
        self
    }

    pub fn with_emission(mut self, emission: Vec3) -> Self {
        self.emission = emission;
        self
    }
}

impl Default for Material {
    fn default() -> Self {
        Self {
            name: Default::default(),
            base_color: Vec3::ONE,
            emission: Vec3::ZERO,
        }
    }
}
