#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum ObjectType {
    MeshInstance = 0,
    Plane = 1,
    Sphere = 2,
    Cube = 3,
}

impl ObjectType {
    pub fn from_raw(raw: u32) -> Option<Self> {
        match raw {
            0 => Some(Self::MeshInstance),
            1 => Some(Self::Plane),
            2 => Some(Self::Sphere),
            3 => Some(Self::Cube),
            _ => None,
        }
    }

    pub fn raw(self) -> u32 {
        self as u32
    }
}
