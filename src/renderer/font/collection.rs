use super::face::Face;

/// Index of a face inside a `FontCollection`, in insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FaceIndex(pub usize);

/// Ordered fallback chain of faces.
///
/// The first face added is the primary font; later faces are consulted
/// only for characters the earlier ones lack.
#[derive(Default)]
pub struct FontCollection {
    faces: Vec<Face>,
}

impl FontCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, face: Face) -> FaceIndex {
        let index = FaceIndex(self.faces.len());
        self.faces.push(face);
        index
    }

    pub fn len(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    pub fn get(&self, index: FaceIndex) -> Option<&Face> {
        self.faces.get(index.0)
    }

    /// Finds the first face that can render `ch`.
    pub fn find(&self, ch: char) -> Option<FaceIndex> {
        self.faces
            .iter()
            .position(|face| face.has_char(ch))
            .map(FaceIndex)
    }
}
