use std::fmt;

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

use crate::backgammon::{Checker, Color, Dice, EngineError, HalfMove, Position, Sides, Turn};

pub const POINTS: usize = 24;
pub const CHECKERS_PER_SIDE: usize = 15;

/// Opening layout from White's side: (external point, checkers).
/// Black mirrors it onto `25 - point`.
const OPENING: [(u8, usize); 4] = [(24, 2), (13, 5), (8, 3), (6, 5)];

/// Whether [`Board::bear_off`] insists that every checker of the color is home.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BearOffRule {
    #[default]
    RequireHomeBoard,
    Permissive,
}

/// What happened on the target of a successful move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Landing {
    Placed,
    /// A lone opposing checker was sent to the bar.
    Hit(Color),
    BorneOff,
}

impl Landing {
    pub fn hit(&self) -> Option<Color> {
        match self {
            Landing::Hit(color) => Some(*color),
            _ => None,
        }
    }
}

/// Plain snapshot of a [`Board`]: 24 point stacks (bottom to top), bar and off per color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardState {
    pub points: Vec<Vec<Checker>>,
    pub bar: Sides<Vec<Checker>>,
    pub off: Sides<Vec<Checker>>,
}

/// The 24 points, the bar and the off area. Every point holds checkers of at
/// most one color, and the last checker of a point stack is its top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    points: [Vec<Checker>; POINTS],
    bar: Sides<Vec<Checker>>,
    off: Sides<Vec<Checker>>,
    bear_off_rule: BearOffRule,
}

impl Board {
    /// Creates a new board with the default starting position.
    pub fn new() -> Self {
        let mut board = Self::empty();
        board.setup_initial_position();
        board
    }

    /// Creates an empty board with no checkers on it.
    pub fn empty() -> Self {
        Board {
            points: std::array::from_fn(|_| Vec::new()),
            bar: Sides::default(),
            off: Sides::default(),
            bear_off_rule: BearOffRule::default(),
        }
    }

    pub fn with_bear_off_rule(mut self, rule: BearOffRule) -> Self {
        self.bear_off_rule = rule;
        self
    }

    pub fn bear_off_rule(&self) -> BearOffRule {
        self.bear_off_rule
    }

    pub fn set_bear_off_rule(&mut self, rule: BearOffRule) {
        self.bear_off_rule = rule;
    }

    pub fn reset(&mut self) {
        for point in self.points.iter_mut() {
            point.clear();
        }
        for color in Color::ALL {
            self.bar[color].clear();
            self.off[color].clear();
        }
    }

    pub fn setup_initial_position(&mut self) {
        self.reset();
        for (point, count) in OPENING {
            let white = point as usize - 1;
            let black = POINTS - point as usize;
            self.points[white] = vec![Checker::new(Color::White); count];
            self.points[black] = vec![Checker::new(Color::Black); count];
        }
    }

    fn check_index(index: usize) -> Result<(), EngineError> {
        if index < POINTS {
            Ok(())
        } else {
            Err(EngineError::PointOutOfRange { index })
        }
    }

    pub fn point(&self, index: usize) -> Result<&[Checker], EngineError> {
        Self::check_index(index)?;
        Ok(&self.points[index])
    }

    pub fn point_count(&self, index: usize) -> Result<usize, EngineError> {
        Ok(self.point(index)?.len())
    }

    pub fn point_top_color(&self, index: usize) -> Result<Option<Color>, EngineError> {
        Ok(self.point(index)?.last().map(|c| c.color))
    }

    /// Signed checker count: positive for White, negative for Black.
    pub fn get_checkers_on_position(&self, index: usize) -> Result<i8, EngineError> {
        let point = self.point(index)?;
        Ok(match point.last() {
            None => 0,
            Some(Checker { color: Color::White }) => point.len() as i8,
            Some(Checker { color: Color::Black }) => -(point.len() as i8),
        })
    }

    /// Replaces a point with `value` checkers, positive for White and negative for Black.
    pub fn set_checkers_on_position(&mut self, index: usize, value: i8) -> Result<(), EngineError> {
        Self::check_index(index)?;
        let color = if value >= 0 { Color::White } else { Color::Black };
        self.points[index] = vec![Checker::new(color); value.unsigned_abs() as usize];
        Ok(())
    }

    pub fn bar(&self, color: Color) -> &[Checker] {
        &self.bar[color]
    }

    pub fn off(&self, color: Color) -> &[Checker] {
        &self.off[color]
    }

    pub fn bar_count(&self, color: Color) -> usize {
        self.bar[color].len()
    }

    pub fn off_count(&self, color: Color) -> usize {
        self.off[color].len()
    }

    pub fn put_on_bar(&mut self, color: Color, count: usize) {
        self.bar[color].extend(std::iter::repeat_n(Checker::new(color), count));
    }

    pub fn put_off(&mut self, color: Color, count: usize) {
        self.off[color].extend(std::iter::repeat_n(Checker::new(color), count));
    }

    fn owned_by(&self, index: usize, color: Color) -> bool {
        self.points[index].last().is_some_and(|c| c.color == color)
    }

    pub fn checkers_on_points(&self, color: Color) -> usize {
        self.points
            .iter()
            .filter(|p| p.last().is_some_and(|c| c.color == color))
            .map(Vec::len)
            .sum()
    }

    /// Checkers of `color` anywhere: points, bar and off.
    pub fn checker_count(&self, color: Color) -> usize {
        self.checkers_on_points(color) + self.bar_count(color) + self.off_count(color)
    }

    /// Pips `color` still needs to bear everything off. Bar checkers count 25.
    pub fn pip_count(&self, color: Color) -> u32 {
        let on_points: u32 = (0..POINTS)
            .filter(|&i| self.owned_by(i, color))
            .map(|i| color.pips_to_off(i) as u32 * self.points[i].len() as u32)
            .sum();
        on_points + 25 * self.bar_count(color) as u32
    }

    pub fn is_point_available(&self, index: usize, color: Color) -> bool {
        match self.points.get(index) {
            None => false,
            Some(point) => match point.last() {
                None => true,
                Some(top) if top.color == color => true,
                Some(_) => point.len() == 1,
            },
        }
    }

    /// Lands a checker of `color` on `index`, hitting a blot if there is one.
    /// The caller has already checked availability.
    fn land(&mut self, index: usize, color: Color) -> Landing {
        let mut landing = Landing::Placed;
        if let Some(top) = self.points[index].last().copied() {
            if top.color != color {
                self.points[index].clear();
                self.bar[top.color].push(top);
                landing = Landing::Hit(top.color);
            }
        }
        self.points[index].push(Checker::new(color));
        landing
    }

    /// Moves the top checker of `from` onto `to`. Returns `None` and leaves the
    /// board untouched if `from` has no `color` checker on top or `to` is blocked.
    pub fn move_checker(&mut self, from: usize, to: usize, color: Color) -> Option<Landing> {
        if from >= POINTS || from == to || !self.owned_by(from, color) || !self.is_point_available(to, color) {
            return None;
        }
        self.points[from].pop();
        Some(self.land(to, color))
    }

    pub fn move_from_bar(&mut self, color: Color, to: usize) -> Option<Landing> {
        if self.bar[color].is_empty() || !self.is_point_available(to, color) {
            return None;
        }
        self.bar[color].pop();
        Some(self.land(to, color))
    }

    pub fn bear_off(&mut self, from: usize, color: Color) -> bool {
        if from >= POINTS || !self.owned_by(from, color) || !self.bear_off_allowed(color) {
            return false;
        }
        if let Some(checker) = self.points[from].pop() {
            self.off[color].push(checker);
        }
        true
    }

    fn bear_off_allowed(&self, color: Color) -> bool {
        match self.bear_off_rule {
            BearOffRule::Permissive => true,
            BearOffRule::RequireHomeBoard => self.all_checkers_in_home_board(color),
        }
    }

    pub fn all_checkers_in_home_board(&self, color: Color) -> bool {
        let home = color.home_indices();
        self.bar[color].is_empty() && (0..POINTS).filter(|i| !home.contains(i)).all(|i| !self.owned_by(i, color))
    }

    /// Executes a half-move produced by [`Self::possible_moves`] (or any
    /// structurally equivalent one).
    pub fn apply_half_move(&mut self, color: Color, half_move: &HalfMove) -> Option<Landing> {
        match (half_move.from, half_move.to) {
            (Position::Bar, to) => self.move_from_bar(color, to.index()?),
            (from, Position::Off) => self.bear_off(from.index()?, color).then_some(Landing::BorneOff),
            (from, to) => self.move_checker(from.index()?, to.index()?, color),
        }
    }

    /// Inverse of [`Self::apply_half_move`]: puts the checker back on `from`
    /// and returns a hit checker from the bar to `to`.
    pub(crate) fn revert_half_move(&mut self, color: Color, from: Position, to: Position, hit: Option<Color>) -> bool {
        let source_ok = match from {
            Position::Bar => true,
            Position::Off => false,
            point => point.index().is_some_and(|i| self.points[i].last().is_none_or(|c| c.color == color)),
        };
        let target_ok = match to {
            Position::Off => !self.off[color].is_empty(),
            Position::Bar => false,
            point => point.index().is_some_and(|i| self.owned_by(i, color) && (hit.is_none() || self.points[i].len() == 1)),
        };
        let hit_ok = hit.is_none_or(|hit| hit != color && !self.bar[hit].is_empty());
        if !(source_ok && target_ok && hit_ok) {
            return false;
        }

        let checker = match to {
            Position::Off => self.off[color].pop(),
            point => point.index().and_then(|i| self.points[i].pop()),
        };
        let Some(checker) = checker else {
            return false;
        };
        if let (Some(hit), Some(index)) = (hit, to.index()) {
            if let Some(captured) = self.bar[hit].pop() {
                self.points[index].push(captured);
            }
        }
        match from.index() {
            Some(index) => self.points[index].push(checker),
            None => self.bar[color].push(checker),
        }
        true
    }

    /// Every half-move `color` can make with one of `dice`. While the color has
    /// checkers on the bar only entering moves are produced. A `(from, to)`
    /// pair reachable with several dice is reported once, with the smallest die.
    pub fn possible_moves(&self, color: Color, dice: &[u8]) -> Vec<HalfMove> {
        let mut values: Vec<u8> = dice.iter().copied().filter(|d| (1..=6).contains(d)).collect();
        values.sort_unstable();
        values.dedup();

        let mut seen = HashSet::new();
        let mut moves = Vec::new();
        let mut push = |half_move: HalfMove| {
            if seen.insert((half_move.from, half_move.to)) {
                moves.push(half_move);
            }
        };

        if !self.bar[color].is_empty() {
            for &die in values.iter() {
                if let Some(entry) = color.entry_index(die).filter(|&e| self.is_point_available(e, color)) {
                    push(HalfMove::new(Position::Bar, Position::from_index(entry), die));
                }
            }
            return moves;
        }

        let occupied: Vec<usize> = (0..POINTS).filter(|&i| self.owned_by(i, color)).collect();

        for &die in values.iter() {
            for &i in occupied.iter() {
                if let Some(target) = color.advance(i, die) {
                    if self.is_point_available(target, color) {
                        push(HalfMove::new(Position::from_index(i), Position::from_index(target), die));
                    }
                }
            }
        }

        if self.bear_off_allowed(color) {
            let farthest = occupied.iter().map(|&i| color.pips_to_off(i)).max().unwrap_or(0);
            for &die in values.iter() {
                for &i in occupied.iter() {
                    let pips = color.pips_to_off(i);
                    if pips == die || (pips < die && pips == farthest) {
                        push(HalfMove::new(Position::from_index(i), Position::Off, die));
                    }
                }
            }
        }

        moves
    }

    /// All ways `color` can play its whole roll. Only sequences using the
    /// maximum number of dice are kept, and when just one die of a non-double
    /// can be played it must be the larger one if that is possible.
    pub fn legal_turns(&self, color: Color, dice: &Dice) -> Vec<Turn> {
        let mut stack: Vec<(Dice, Board, Turn)> = vec![(dice.clone(), self.clone(), Turn::new())];
        let mut next_stack: Vec<(Dice, Board, Turn)> = Vec::new();

        let mut best_result_len = 0;
        let mut results = Vec::new();

        loop {
            while let Some((dice, board, previous_moves)) = stack.pop() {
                let previous_moves_len = previous_moves.len();
                if previous_moves_len > best_result_len {
                    results.clear();
                    best_result_len = previous_moves_len;
                    results.push(previous_moves.clone());
                } else if previous_moves_len == best_result_len {
                    results.push(previous_moves.clone());
                }
                if dice.all_used() {
                    continue;
                }

                for half_move in board.possible_moves(color, &dice.unique_values()) {
                    let mut board = board.clone();
                    if board.apply_half_move(color, &half_move).is_none() {
                        continue;
                    }
                    let mut dice = dice.clone();
                    dice.use_move(half_move.die);
                    let mut turn = previous_moves.clone();
                    turn.add_half_move(half_move);
                    next_stack.push((dice, board, turn));
                }
            }
            if next_stack.is_empty() {
                break;
            }
            let mut seen = HashSet::new();
            stack.clear();
            for entry in next_stack.drain(..) {
                if seen.insert(entry.2.unordered_key()) {
                    stack.push(entry);
                }
            }
        }

        if best_result_len == 0 {
            return Vec::new();
        }

        if best_result_len == 1 && !dice.is_double() {
            if let Some(larger) = dice.unique_values().into_iter().max() {
                if results.iter().any(|t| t[0].die == larger) {
                    results.retain(|t| t[0].die == larger);
                }
            }
        }

        results
    }

    pub fn state(&self) -> BoardState {
        BoardState {
            points: self.points.to_vec(),
            bar: self.bar.clone(),
            off: self.off.clone(),
        }
    }

    /// Replaces every container with the contents of `state`. The board is left
    /// unchanged if `state` does not have 24 points, mixes colors on a point, or
    /// files a checker under the wrong color's bar or off area.
    pub fn set_state(&mut self, state: BoardState) -> Result<(), EngineError> {
        if state.points.len() != POINTS {
            return Err(EngineError::malformed(format!("expected {POINTS} points, got {}", state.points.len())));
        }
        for (i, point) in state.points.iter().enumerate() {
            if point.windows(2).any(|w| w[0].color != w[1].color) {
                return Err(EngineError::malformed(format!("point {} holds both colors", i + 1)));
            }
        }
        for color in Color::ALL {
            if state.bar[color].iter().chain(state.off[color].iter()).any(|c| c.color != color) {
                return Err(EngineError::malformed(format!("{color} bar or off area holds a foreign checker")));
            }
        }

        let BoardState { points, bar, off } = state;
        for (slot, point) in self.points.iter_mut().zip(points) {
            *slot = point;
        }
        self.bar = bar;
        self.off = off;
        Ok(())
    }
}

impl Board {
    fn render_row(&self, indices: impl Iterator<Item = usize>) -> String {
        indices
            .map(|i| format!("{:3}", self.get_checkers_on_position(i).unwrap_or_default()))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let top_left = self.render_row((6..12).rev());
        let top_right = self.render_row((0..6).rev());
        let bottom_left = self.render_row(12..18);
        let bottom_right = self.render_row(18..24);

        writeln!(f, " 12  11  10   9   8   7 | W |  6   5   4   3   2   1")?;
        writeln!(f, "{} | {} | {}", top_left, self.bar_count(Color::White), top_right)?;
        writeln!(f, "=====================================================")?;
        writeln!(f, "{} | {} | {}", bottom_left, self.bar_count(Color::Black), bottom_right)?;
        writeln!(f, " 13  14  15  16  17  18 | B | 19  20  21  22  23  24")?;
        write!(f, "off: white {} black {}", self.off_count(Color::White), self.off_count(Color::Black))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn white() -> Checker {
        Checker::new(Color::White)
    }

    fn black() -> Checker {
        Checker::new(Color::Black)
    }

    fn assert_invariants(board: &Board) {
        for color in Color::ALL {
            assert_eq!(board.checker_count(color), CHECKERS_PER_SIDE);
        }
        for i in 0..POINTS {
            let point = board.point(i).unwrap();
            assert!(point.windows(2).all(|w| w[0].color == w[1].color));
        }
    }

    #[test]
    fn test_initial_position() {
        let board = Board::new();
        assert_invariants(&board);
        assert_eq!(board.get_checkers_on_position(23), Ok(2));
        assert_eq!(board.get_checkers_on_position(12), Ok(5));
        assert_eq!(board.get_checkers_on_position(7), Ok(3));
        assert_eq!(board.get_checkers_on_position(5), Ok(5));
        assert_eq!(board.get_checkers_on_position(0), Ok(-2));
        assert_eq!(board.get_checkers_on_position(11), Ok(-5));
        assert_eq!(board.get_checkers_on_position(16), Ok(-3));
        assert_eq!(board.get_checkers_on_position(18), Ok(-5));
        assert_eq!(board.pip_count(Color::White), 167);
        assert_eq!(board.pip_count(Color::Black), 167);
    }

    #[test]
    fn test_setup_is_idempotent() {
        let mut board = Board::new();
        board.move_checker(0, 3, Color::Black);
        board.setup_initial_position();
        board.setup_initial_position();
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_queries_out_of_range() {
        let board = Board::new();
        assert_eq!(board.point_count(24), Err(EngineError::PointOutOfRange { index: 24 }));
        assert!(board.point_top_color(99).is_err());
        assert_eq!(board.point_top_color(5), Ok(Some(Color::White)));
        assert_eq!(board.point_top_color(2), Ok(None));
        assert!(!board.is_point_available(24, Color::White));
        assert_eq!(board.get_checkers_on_position(24), Err(EngineError::PointOutOfRange { index: 24 }));
        assert_eq!(board.get_checkers_on_position(23), Ok(2));
    }

    #[test]
    fn test_point_availability() {
        let mut board = Board::empty();
        board.set_checkers_on_position(1, 1).unwrap();
        board.set_checkers_on_position(2, -1).unwrap();
        board.set_checkers_on_position(3, -2).unwrap();
        assert!(board.is_point_available(0, Color::White));
        assert!(board.is_point_available(1, Color::White));
        assert!(board.is_point_available(2, Color::White));
        assert!(!board.is_point_available(3, Color::White));
        assert!(board.is_point_available(3, Color::Black));
    }

    #[test]
    fn test_hit() {
        let mut board = Board::empty();
        board.set_checkers_on_position(3, 1).unwrap();
        board.set_checkers_on_position(6, -1).unwrap();
        assert_eq!(board.move_checker(3, 6, Color::White), Some(Landing::Hit(Color::Black)));
        assert_eq!(board.point_top_color(6), Ok(Some(Color::White)));
        assert_eq!(board.point_count(6), Ok(1));
        assert_eq!(board.bar(Color::Black).len(), 1);
        assert_eq!(board.point_count(3), Ok(0));
    }

    #[test]
    fn test_blocked() {
        let mut board = Board::empty();
        board.set_checkers_on_position(1, 1).unwrap();
        board.set_checkers_on_position(2, -2).unwrap();
        let before = board.clone();
        assert_eq!(board.move_checker(1, 2, Color::White), None);
        assert_eq!(board, before);
    }

    #[test]
    fn test_simple_move() {
        let mut board = Board::empty();
        board.set_checkers_on_position(2, 2).unwrap();
        assert_eq!(board.move_checker(2, 4, Color::White), Some(Landing::Placed));
        assert_eq!(board.point_count(2), Ok(1));
        assert_eq!(board.get_checkers_on_position(4), Ok(1));
    }

    #[test]
    fn test_move_wrong_color_leaves_board() {
        let mut board = Board::new();
        let before = board.clone();
        assert_eq!(board.move_checker(0, 2, Color::White), None);
        assert_eq!(board.move_checker(2, 3, Color::White), None);
        assert_eq!(board.move_checker(30, 3, Color::White), None);
        assert_eq!(board, before);
    }

    #[test]
    fn test_move_from_bar() {
        let mut board = Board::empty();
        board.put_on_bar(Color::White, 1);
        board.set_checkers_on_position(20, -1).unwrap();
        board.set_checkers_on_position(19, -2).unwrap();
        assert_eq!(board.move_from_bar(Color::White, 19), None);
        assert_eq!(board.move_from_bar(Color::White, 20), Some(Landing::Hit(Color::Black)));
        assert_eq!(board.bar_count(Color::White), 0);
        assert_eq!(board.bar_count(Color::Black), 1);
        assert_eq!(board.move_from_bar(Color::White, 21), None);
    }

    #[test]
    fn test_bear_off_requires_home_board() {
        let mut board = Board::empty();
        board.set_checkers_on_position(2, 2).unwrap();
        board.set_checkers_on_position(10, 1).unwrap();
        assert!(!board.all_checkers_in_home_board(Color::White));
        assert!(!board.bear_off(2, Color::White));

        board.set_bear_off_rule(BearOffRule::Permissive);
        assert!(board.bear_off(2, Color::White));
        assert_eq!(board.off_count(Color::White), 1);

        board.set_bear_off_rule(BearOffRule::RequireHomeBoard);
        board.set_checkers_on_position(10, 0).unwrap();
        assert!(board.all_checkers_in_home_board(Color::White));
        assert!(board.bear_off(2, Color::White));
        assert_eq!(board.off_count(Color::White), 2);
    }

    #[test]
    fn test_home_board_counts_bar() {
        let mut board = Board::empty();
        board.set_checkers_on_position(20, -3).unwrap();
        assert!(board.all_checkers_in_home_board(Color::Black));
        board.put_on_bar(Color::Black, 1);
        assert!(!board.all_checkers_in_home_board(Color::Black));
    }

    #[test]
    fn test_state_round_trip() {
        let mut board = Board::new();
        board.move_checker(0, 3, Color::Black);
        board.put_on_bar(Color::White, 1);
        let state = board.state();
        let mut fresh = Board::empty();
        fresh.set_state(state.clone()).unwrap();
        assert_eq!(fresh.state(), state);
        assert_eq!(fresh, board);
    }

    #[test]
    fn test_set_state_rejects_mixed_point() {
        let mut board = Board::new();
        let mut state = board.state();
        state.points[4] = vec![white(), black()];
        assert!(matches!(board.set_state(state), Err(EngineError::MalformedState { .. })));
        assert_eq!(board, Board::new());

        let mut short = board.state();
        short.points.pop();
        assert!(board.set_state(short).is_err());

        let mut foreign = board.state();
        foreign.bar.white.push(black());
        assert!(board.set_state(foreign).is_err());
    }

    #[test]
    fn test_opening_possible_moves() {
        let board = Board::new();
        let moves = board.possible_moves(Color::White, &[6, 5]);
        assert!(moves.contains(&HalfMove::new(Position::Point(24), Position::Point(18), 6)));
        assert!(moves.contains(&HalfMove::new(Position::Point(13), Position::Point(8), 5)));
        // 6 -> 1 would land on Black's anchor.
        assert!(!moves.iter().any(|m| m.from == Position::Point(6) && m.to == Position::Point(1)));
        assert!(moves.iter().all(|m| !m.is_bear_off() && !m.is_bar_entry()));
    }

    #[test]
    fn test_bar_entry_only() {
        let mut board = Board::new();
        board.set_checkers_on_position(5, 4).unwrap();
        board.put_on_bar(Color::White, 1);
        let moves = board.possible_moves(Color::White, &[1, 6]);
        assert_eq!(moves, vec![HalfMove::new(Position::Bar, Position::Point(24), 1)]);

        let moves = board.possible_moves(Color::Black, &[3, 3]);
        assert!(moves.iter().all(|m| !m.is_bar_entry()));
    }

    #[test]
    fn test_bear_off_moves() {
        let mut board = Board::empty();
        board.set_checkers_on_position(3, 2).unwrap();
        board.set_checkers_on_position(0, 1).unwrap();

        let moves = board.possible_moves(Color::White, &[4]);
        assert!(moves.contains(&HalfMove::new(Position::Point(4), Position::Off, 4)));

        // No checker on the 6 point or beyond: a 6 bears off from the farthest point.
        let moves = board.possible_moves(Color::White, &[6]);
        assert_eq!(moves, vec![HalfMove::new(Position::Point(4), Position::Off, 6)]);

        // A 2 cannot bear off from the 4 point while checkers sit farther back.
        let moves = board.possible_moves(Color::White, &[2]);
        assert!(moves.contains(&HalfMove::new(Position::Point(4), Position::Point(2), 2)));
        assert!(!moves.iter().any(|m| m.is_bear_off()));
    }

    #[test]
    fn test_no_bear_off_with_straggler() {
        let mut board = Board::empty();
        board.set_checkers_on_position(20, -2).unwrap();
        board.set_checkers_on_position(10, -1).unwrap();
        let moves = board.possible_moves(Color::Black, &[3, 4]);
        assert!(moves.iter().all(|m| !m.is_bear_off()));
    }

    #[test]
    fn test_apply_and_revert() {
        let mut board = Board::empty();
        board.set_checkers_on_position(10, 1).unwrap();
        board.set_checkers_on_position(7, -1).unwrap();
        let before = board.clone();
        let half_move = HalfMove::new(Position::Point(11), Position::Point(8), 3);
        assert_eq!(board.apply_half_move(Color::White, &half_move), Some(Landing::Hit(Color::Black)));
        assert!(board.revert_half_move(Color::White, half_move.from, half_move.to, Some(Color::Black)));
        assert_eq!(board, before);
    }

    #[test]
    fn test_legal_turns_opening() {
        let board = Board::new();
        let turns = board.legal_turns(Color::White, &Dice::from_numbers(6, 5));
        assert!(!turns.is_empty());
        assert!(turns.iter().all(|t| t.len() == 2));

        let mut leap = Turn::new();
        leap.add_half_move(HalfMove::new(Position::Point(24), Position::Point(18), 6));
        leap.add_half_move(HalfMove::new(Position::Point(18), Position::Point(13), 5));
        assert!(turns.iter().any(|t| t.unordered_equal(&leap)));

        let doubles = board.legal_turns(Color::Black, &Dice::from_numbers(3, 3));
        assert!(doubles.iter().all(|t| t.len() == 4));
    }

    #[test]
    fn test_legal_turns_larger_die() {
        let mut board = Board::empty();
        board.set_checkers_on_position(11, 1).unwrap();
        board.set_checkers_on_position(0, -2).unwrap();
        let turns = board.legal_turns(Color::White, &Dice::from_numbers(5, 6));
        assert_eq!(turns.len(), 1);
        assert_eq!(turns[0][0], HalfMove::new(Position::Point(12), Position::Point(6), 6));
    }

    #[test]
    fn test_legal_turns_none() {
        let mut board = Board::empty();
        board.put_on_bar(Color::Black, 1);
        board.set_checkers_on_position(1, 2).unwrap();
        board.set_checkers_on_position(3, 2).unwrap();
        assert!(board.legal_turns(Color::Black, &Dice::from_numbers(2, 4)).is_empty());
    }

    #[test]
    fn test_display() {
        let text = Board::new().to_string();
        assert!(text.contains("| W |"));
        assert!(text.contains("off: white 0 black 0"));
    }
}
