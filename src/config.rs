use bon::Builder;

/// How a game treats dice with different numbers of faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShapePolicy {
    /// Accept any dice. Comparing faces across dice is up to the caller.
    #[default]
    Permissive,
    /// Require every die to have the same number of faces.
    Strict,
}

/// How an analyzer holds the table it reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Binding {
    /// Borrow the source table. The source cannot be replayed meanwhile.
    #[default]
    Borrow,
    /// Copy the table. Later plays on the source are not seen.
    Snapshot,
}

#[derive(Debug, Clone, Copy, Default, Builder)]
pub struct GameConfig {
    #[builder(default)]
    shape: ShapePolicy,
}

impl GameConfig {
    pub fn shape(&self) -> ShapePolicy {
        self.shape
    }
}
