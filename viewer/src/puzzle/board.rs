// puzzle/board.rs - Form-backed puzzle state with all-or-nothing commits

use super::{build, parse, parse_size_field, validate_size, GridGeneration, PuzzleError, PuzzleMatrix, Result};
use crate::error_handling::Notifier;
use crate::scene::Scene;

/// Size field, digit buffer, and the last committed matrix.
///
/// A rejected size or input raises an alert and leaves the committed state alone.
pub struct PuzzleBoard<N: Notifier> {
    size: usize,
    input: String,
    committed: PuzzleMatrix,
    cell_size: f32,
    generation: GridGeneration,
    notifier: N,
}

impl<N: Notifier> PuzzleBoard<N> {
    /// The size field starts at the initial board's row count
    pub fn new(initial: PuzzleMatrix, cell_size: f32, notifier: N) -> Self {
        Self {
            size: initial.row_count(),
            input: String::new(),
            committed: initial,
            cell_size,
            generation: GridGeneration::new(),
            notifier,
        }
    }

    /// Put the committed matrix into the scene (first mount)
    pub fn show(&mut self, scene: &mut Scene) -> Result<()> {
        let blocks = build(&self.committed, self.cell_size)?;
        self.generation.replace(scene, blocks);
        Ok(())
    }

    /// Numeric size field changed
    pub fn set_size(&mut self, requested: i64) -> Result<usize> {
        match validate_size(requested) {
            Ok(size) => {
                log::debug!("puzzle size {} -> {size}", self.size);
                self.size = size;
                Ok(size)
            }
            Err(err) => Err(self.reject(err)),
        }
    }

    /// Raw text of the size field changed
    pub fn set_size_field(&mut self, raw: &str) -> Result<usize> {
        match parse_size_field(raw) {
            Ok(size) => self.set_size(size as i64),
            Err(err) => Err(self.reject(err)),
        }
    }

    /// Digit text field changed; nothing is parsed until `commit`
    pub fn set_input(&mut self, raw: impl Into<String>) {
        self.input = raw.into();
    }

    /// Parse the buffer and, only if it is valid, swap the grid generation in `scene`.
    pub fn commit(&mut self, scene: &mut Scene) -> Result<&PuzzleMatrix> {
        let parsed = parse(&self.input, self.size).map_err(|err| self.reject(err))?;
        let blocks = build(&parsed, self.cell_size).map_err(|err| self.reject(err))?;

        self.generation.replace(scene, blocks);
        self.committed = parsed;
        log::info!("committed {0}x{0} puzzle", self.size);
        Ok(&self.committed)
    }

    /// Remove this board's blocks from `scene`
    pub fn clear(&mut self, scene: &mut Scene) {
        self.generation.clear(scene);
    }

    fn reject(&mut self, err: PuzzleError) -> PuzzleError {
        self.notifier.alert(&err.to_string());
        err
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Digits the input field must contain for the current size
    pub fn required_digits(&self) -> usize {
        self.size * self.size
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn committed(&self) -> &PuzzleMatrix {
        &self.committed
    }

    pub fn generation(&self) -> &GridGeneration {
        &self.generation
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error_handling::CollectingNotifier;

    fn board() -> (PuzzleBoard<CollectingNotifier>, CollectingNotifier, Scene) {
        let alerts = CollectingNotifier::new();
        let mut scene = Scene::default();
        let mut board = PuzzleBoard::new(PuzzleMatrix::initial(), 1.0, alerts.clone());
        board.show(&mut scene).unwrap();
        (board, alerts, scene)
    }

    #[test]
    fn test_show_places_initial_board() {
        let (board, alerts, scene) = board();
        assert_eq!(scene.len(), 16);
        assert_eq!(board.generation().generation(), 1);
        assert!(alerts.is_empty());
    }

    #[test]
    fn test_rejected_input_keeps_committed_state() {
        let (mut board, alerts, mut scene) = board();
        let revision = scene.revision();

        board.set_input("abc");
        assert_eq!(board.commit(&mut scene).unwrap_err(), PuzzleError::NoDigitsFound);
        board.set_input("123");
        assert!(board.commit(&mut scene).is_err());

        assert_eq!(board.committed(), &PuzzleMatrix::initial());
        assert_eq!(scene.revision(), revision);
        assert_eq!(alerts.alerts(), vec!["No matching numbers found", "Input Size different: 3"]);
    }

    #[test]
    fn test_resize_then_commit_requires_new_digit_count() {
        let (mut board, alerts, mut scene) = board();

        assert!(board.set_size(10).is_err());
        assert!(board.set_size(3).is_err());
        assert_eq!(board.size(), 4);
        assert_eq!(alerts.len(), 2);

        assert_eq!(board.set_size(5), Ok(5));
        assert_eq!(board.required_digits(), 25);

        board.set_input("1234432121433412");
        assert_eq!(
            board.commit(&mut scene).unwrap_err(),
            PuzzleError::SizeMismatch { expected: 25, actual: 16 }
        );

        board.set_input("1234512345123451234512345");
        let committed = board.commit(&mut scene).unwrap();
        assert_eq!(committed.row_count(), 5);
        assert_eq!(scene.len(), 25);
        assert_eq!(board.generation().generation(), 2);
    }

    #[test]
    fn test_size_field_follows_initial_board() {
        let five = PuzzleMatrix::from_rows(vec![vec![1; 5]; 5]).unwrap();
        let board = PuzzleBoard::new(five, 1.0, CollectingNotifier::new());
        assert_eq!(board.size(), 5);
        assert_eq!(board.required_digits(), 25);
    }

    #[test]
    fn test_size_field_text() {
        let (mut board, alerts, _) = board();
        assert_eq!(board.set_size_field(" 6 "), Ok(6));
        assert!(board.set_size_field("six").is_err());
        assert!(board.set_size_field("12").is_err());
        assert_eq!(board.size(), 6);
        assert_eq!(alerts.alerts(), vec!["Puzzle size must be range 4 ~ 9"; 2]);
    }
}
