//! Solver loop.
//!
//! # Algorithm
//!
//! 1. Discard from the pool every slot that all teachers, or all rooms,
//!    already have assigned.
//! 2. For up to `round_budget` rounds, select a strategy for the round index
//!    and attempt the round. Failed rounds change nothing and only cost budget.
//! 3. After each round, stop with [`Solution::Solved`] once the total remaining
//!    subject time is zero or below.
//! 4. Otherwise report [`Solution::NotSolved`].
//!
//! # Complexity
//! O(B * g * (s + t + r)) selection checks, where B = round budget,
//! g = groups per strategy, and s/t/r = number of subjects/teachers/rooms.

use log::{debug, error, info};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::{serial_strategy, RandomSelector, RoundOutcome, SelectionMode, SolverConfig, Strategy};
use crate::error::Result;
use crate::models::Lesson;
use crate::pool::{SlotPool, WeeklySlotPool};
use crate::selection::{
    RoomCatalog, RoomRoster, SubjectCatalog, SubjectRoster, TeacherCatalog, TeacherRoster,
};

/// Outcome of a solver run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Solution {
    /// Every subject reached its weekly time.
    Solved {
        /// Lessons placed during this run, in placement order.
        lessons: Vec<Lesson>,
        /// Rounds attempted, including failed ones.
        rounds_used: usize,
    },
    /// The round budget ran out first.
    NotSolved {
        /// Rounds attempted.
        rounds: usize,
        /// Subject minutes still unplaced.
        remaining_minutes: i64,
    },
}

impl Solution {
    /// Whether a complete timetable was found.
    pub fn is_solved(&self) -> bool {
        matches!(self, Solution::Solved { .. })
    }

    /// Placed lessons, if solved.
    pub fn lessons(&self) -> Option<&[Lesson]> {
        match self {
            Solution::Solved { lessons, .. } => Some(lessons),
            Solution::NotSolved { .. } => None,
        }
    }

    /// Consumes the solution, returning the lessons if solved.
    pub fn into_lessons(self) -> Option<Vec<Lesson>> {
        match self {
            Solution::Solved { lessons, .. } => Some(lessons),
            Solution::NotSolved { .. } => None,
        }
    }
}

/// Round-based greedy timetable solver.
///
/// Owns the slot pool and the three catalogs; reservations are updated in
/// place as rounds commit.
///
/// # Example
///
/// ```
/// use u_timetable::models::{Room, Subject, Teacher, WeekGrid, Weekday};
/// use u_timetable::pool::WeeklySlotPool;
/// use u_timetable::selection::{RoomRoster, SubjectRoster, TeacherRoster};
/// use u_timetable::solver::SimpleSolver;
///
/// let grid = WeekGrid::new([Weekday::Monday], 4);
/// let mut solver = SimpleSolver::new(
///     WeeklySlotPool::new(&grid),
///     SubjectRoster::new(vec![Subject::with_periods("math", 1, &grid)]),
///     TeacherRoster::new(vec![Teacher::new("T1", &grid).with_subject("math")]),
///     RoomRoster::new(vec![Room::new("R1", &grid)]),
/// );
///
/// let solution = solver.evaluate_solution_serially(16).unwrap();
/// let lessons = solution.lessons().unwrap();
/// assert_eq!(lessons.len(), 1);
/// assert_eq!(lessons[0].teacher_id(), "T1");
/// ```
#[derive(Debug, Clone)]
pub struct SimpleSolver<
    P = WeeklySlotPool,
    S = SubjectRoster,
    T = TeacherRoster,
    R = RoomRoster,
> {
    pub(super) pool: P,
    pub(super) subjects: S,
    pub(super) teachers: T,
    pub(super) rooms: R,
    pub(super) group: Option<String>,
}

impl<P, S, T, R> SimpleSolver<P, S, T, R>
where
    P: SlotPool,
    S: SubjectCatalog,
    T: TeacherCatalog,
    R: RoomCatalog,
{
    /// Creates a solver over the given pool and catalogs.
    pub fn new(pool: P, subjects: S, teachers: T, rooms: R) -> Self {
        Self {
            pool,
            subjects,
            teachers,
            rooms,
            group: None,
        }
    }

    /// Stamps a learner group label on every lesson.
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    pub fn pool(&self) -> &P {
        &self.pool
    }

    pub fn subjects(&self) -> &S {
        &self.subjects
    }

    pub fn teachers(&self) -> &T {
        &self.teachers
    }

    pub fn rooms(&self) -> &R {
        &self.rooms
    }

    /// Runs with serial strategy selection.
    pub fn evaluate_solution_serially(&mut self, round_budget: usize) -> Result<Solution> {
        self.run(round_budget, serial_strategy)
    }

    /// Runs with random strategy selection seeded from the OS.
    pub fn evaluate_solution_randomly(&mut self, round_budget: usize) -> Result<Solution> {
        self.evaluate_solution_randomly_with(round_budget, SmallRng::from_os_rng())
    }

    /// Runs with random strategy selection drawing from `rng`.
    pub fn evaluate_solution_randomly_with<G: Rng>(
        &mut self,
        round_budget: usize,
        rng: G,
    ) -> Result<Solution> {
        let mut selector = RandomSelector::new(rng);
        self.run(round_budget, |round| selector.select(round))
    }

    /// Runs as described by a [`SolverConfig`].
    pub fn solve(&mut self, config: &SolverConfig) -> Result<Solution> {
        self.group = config.group.clone();
        match (config.mode, config.seed) {
            (SelectionMode::Serial, _) => self.evaluate_solution_serially(config.round_budget),
            (SelectionMode::Random, Some(seed)) => self.evaluate_solution_randomly_with(
                config.round_budget,
                SmallRng::seed_from_u64(seed),
            ),
            (SelectionMode::Random, None) => self.evaluate_solution_randomly(config.round_budget),
        }
    }

    /// Removes from the pool every slot assigned in all teachers, and every
    /// slot assigned in all rooms.
    pub fn discard_common_slots(&mut self) {
        let teacher_slots = self.teachers.common_slots();
        self.pool.discard_slots(&teacher_slots);
        let room_slots = self.rooms.common_slots();
        self.pool.discard_slots(&room_slots);
    }

    /// Runs up to `round_budget` rounds, asking `select` for each round's
    /// strategy.
    ///
    /// # Errors
    /// Stops at the first fatal [`SolveError`](crate::error::SolveError).
    pub fn run<F>(&mut self, round_budget: usize, mut select: F) -> Result<Solution>
    where
        F: FnMut(usize) -> Strategy,
    {
        self.discard_common_slots();
        let mut lessons: Vec<Lesson> = Vec::new();

        if self.subjects.total_remaining_minutes() <= 0 {
            info!("all subjects already satisfied");
            return Ok(Solution::Solved {
                lessons,
                rounds_used: 0,
            });
        }

        for round in 0..round_budget {
            let strategy = select(round);
            match self.attempt_round(strategy) {
                Ok(RoundOutcome::Placed(placed)) => {
                    debug!("round {round} {strategy}: placed {} lessons", placed.len());
                    lessons.extend(placed);
                }
                Ok(RoundOutcome::Failed(reason)) => {
                    debug!("round {round} {strategy}: failed ({reason:?})");
                }
                Err(err) => {
                    error!("round {round} {strategy}: {err}");
                    return Err(err);
                }
            }

            if self.subjects.total_remaining_minutes() <= 0 {
                info!(
                    "solved after {} rounds with {} lessons",
                    round + 1,
                    lessons.len()
                );
                return Ok(Solution::Solved {
                    lessons,
                    rounds_used: round + 1,
                });
            }
        }

        let remaining_minutes = self.subjects.total_remaining_minutes();
        info!("not solved within {round_budget} rounds, {remaining_minutes} minutes unplaced");
        Ok(Solution::NotSolved {
            rounds: round_budget,
            remaining_minutes,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::error::{ReservationError, ResourceKind, SlotError, SolveError};
    use crate::models::{
        ComposedSlot, Reservable, Reservation, Room, Subject, Teacher, TimeSlot, WeekGrid, Weekday,
    };
    use crate::solver::RoundFailure;
    use crate::validation::validate_lessons;

    type Snapshot = (
        BTreeSet<TimeSlot>,
        Vec<(Reservation, i64)>,
        Vec<Reservation>,
        Vec<Reservation>,
    );

    fn mon(p: u8) -> TimeSlot {
        TimeSlot::new(Weekday::Monday, p)
    }

    fn snapshot(solver: &SimpleSolver) -> Snapshot {
        (
            solver.pool().available().clone(),
            solver
                .subjects()
                .subjects()
                .iter()
                .map(|s| (s.reservation().clone(), s.remaining_minutes()))
                .collect(),
            solver
                .teachers()
                .teachers()
                .iter()
                .map(|t| t.reservation().clone())
                .collect(),
            solver
                .rooms()
                .rooms()
                .iter()
                .map(|r| r.reservation().clone())
                .collect(),
        )
    }

    fn single_subject_solver(grid: &WeekGrid, periods: usize) -> SimpleSolver {
        SimpleSolver::new(
            WeeklySlotPool::new(grid),
            SubjectRoster::new(vec![Subject::with_periods("math", periods, grid)]),
            TeacherRoster::new(vec![Teacher::new("T1", grid).with_subject("math")]),
            RoomRoster::new(vec![Room::new("R1", grid)]),
        )
    }

    fn school_solver() -> SimpleSolver {
        let grid = WeekGrid::default();
        SimpleSolver::new(
            WeeklySlotPool::new(&grid),
            SubjectRoster::new(vec![
                Subject::with_periods("math", 4, &grid),
                Subject::with_periods("english", 4, &grid),
                Subject::with_periods("science", 3, &grid).with_room_kind("lab"),
                Subject::with_periods("art", 2, &grid),
            ]),
            TeacherRoster::new(vec![
                Teacher::new("T1", &grid).with_subject("math").with_subject("science"),
                Teacher::new("T2", &grid).with_subject("english").with_subject("art"),
                Teacher::new("T3", &grid).with_subject("math").with_subject("english"),
            ]),
            RoomRoster::new(vec![
                Room::new("R1", &grid),
                Room::new("Lab", &grid).with_kind("lab"),
            ]),
        )
    }

    fn assert_reservations_disjoint(solver: &SimpleSolver) {
        let subjects = solver.subjects().subjects().iter().map(|s| s.reservation());
        let teachers = solver.teachers().teachers().iter().map(|t| t.reservation());
        let rooms = solver.rooms().rooms().iter().map(|r| r.reservation());
        for r in subjects.chain(teachers).chain(rooms) {
            assert!(r.free_slots().is_disjoint(r.assigned_slots()));
        }
    }

    #[test]
    fn test_no_run_long_enough() {
        // Three periods per day: {2,2} needs four
        let grid = WeekGrid::new(Weekday::ALL[..5].iter().copied(), 3);
        let mut solver = single_subject_solver(&grid, 4);
        let before = snapshot(&solver);

        let outcome = solver.attempt_round(Strategy::CATALOG[1]).unwrap();
        assert_eq!(
            outcome,
            RoundOutcome::Failed(RoundFailure::NoConsecutiveRun { periods: 4 })
        );
        assert_eq!(snapshot(&solver), before);
    }

    #[test]
    fn test_stops_when_last_period_placed() {
        let grid = WeekGrid::default();
        let mut solver = single_subject_solver(&grid, 1);

        let solution = solver.evaluate_solution_serially(100).unwrap();
        match solution {
            Solution::Solved {
                lessons,
                rounds_used,
            } => {
                // Every multi-period strategy fails on the one-period budget; {1} is eighth
                assert_eq!(rounds_used, 8);
                assert_eq!(lessons.len(), 1);
                assert_eq!(lessons[0].slot(), &ComposedSlot::from(mon(0)));
            }
            other => panic!("expected solved, got {other:?}"),
        }
        assert_eq!(solver.subjects().total_remaining_minutes(), 0);
        assert_eq!(solver.pool().len(), 39);
    }

    #[test]
    fn test_serial_exhausts_budget() {
        let grid = WeekGrid::default();
        let mut solver = SimpleSolver::new(
            WeeklySlotPool::new(&grid),
            SubjectRoster::new(vec![Subject::with_periods("math", 4, &grid)]),
            TeacherRoster::new(vec![Teacher::new("T1", &grid).with_subject("art")]),
            RoomRoster::new(vec![Room::new("R1", &grid)]),
        );
        let before = snapshot(&solver);

        let mut picked = Vec::new();
        let solution = solver
            .run(16, |round| {
                let s = serial_strategy(round);
                picked.push(s);
                s
            })
            .unwrap();

        assert_eq!(
            solution,
            Solution::NotSolved {
                rounds: 16,
                remaining_minutes: 180
            }
        );
        assert!(!solution.is_solved());
        assert!(solution.lessons().is_none());
        assert_eq!(&picked[..8], &Strategy::CATALOG);
        assert_eq!(&picked[8..], &Strategy::CATALOG);
        assert_eq!(snapshot(&solver), before);
    }

    #[test]
    fn test_failed_group_rolls_back_whole_run() {
        let grid = WeekGrid::default();
        // One-period budget: the second group of {1,3} finds no subject
        let mut solver = single_subject_solver(&grid, 1);
        let before = snapshot(&solver);

        let outcome = solver.attempt_round(Strategy::CATALOG[0]).unwrap();
        match outcome {
            RoundOutcome::Failed(RoundFailure::NoCandidate {
                group,
                slot,
                missing,
            }) => {
                assert_eq!(group, 1);
                assert_eq!(slot, ComposedSlot::compose(&[mon(1), mon(2), mon(3)]).unwrap());
                assert_eq!(missing, ResourceKind::Subject);
            }
            other => panic!("unexpected outcome {other:?}"),
        }
        assert_eq!(snapshot(&solver), before);
    }

    #[test]
    fn test_duplicate_subject_rejected() {
        let grid = WeekGrid::default();
        let mut solver = single_subject_solver(&grid, 4);
        let before = snapshot(&solver);

        let outcome = solver.attempt_round(Strategy::CATALOG[3]).unwrap();
        assert_eq!(
            outcome,
            RoundOutcome::Failed(RoundFailure::DuplicateSubject {
                subject_id: "math".into()
            })
        );
        assert_eq!(snapshot(&solver), before);
    }

    #[test]
    fn test_placed_round_commits_everywhere() {
        let grid = WeekGrid::default();
        let mut solver = single_subject_solver(&grid, 4).with_group("7A");

        let outcome = solver.attempt_round(Strategy::CATALOG[6]).unwrap();
        let RoundOutcome::Placed(lessons) = outcome else {
            panic!("expected placement");
        };
        assert_eq!(lessons.len(), 1);
        assert_eq!(lessons[0].slots(), &[mon(0), mon(1)]);
        assert_eq!(lessons[0].group(), Some("7A"));

        let math = solver.subjects().get("math").unwrap();
        assert_eq!(math.remaining_minutes(), 90);
        assert_eq!(solver.teachers().get("T1").unwrap().assigned_count(), 2);
        assert_eq!(solver.rooms().get("R1").unwrap().assigned_count(), 2);
        assert_eq!(solver.pool().len(), 38);
        assert_reservations_disjoint(&solver);
    }

    #[test]
    fn test_discard_common_slots() {
        let grid = WeekGrid::default();
        let mut solver = SimpleSolver::new(
            WeeklySlotPool::new(&grid),
            SubjectRoster::new(vec![Subject::with_periods("math", 4, &grid)]),
            TeacherRoster::new(vec![
                Teacher::new("T1", &grid).with_subject("math").with_unavailable([mon(0), mon(1)]),
                Teacher::new("T2", &grid).with_subject("math").with_unavailable([mon(0)]),
            ]),
            RoomRoster::new(vec![Room::new("R1", &grid).with_unavailable([mon(7)])]),
        );

        solver.discard_common_slots();
        let once = solver.pool().clone();
        assert!(!once.available().contains(&mon(0)));
        assert!(once.available().contains(&mon(1)));
        assert!(!once.available().contains(&mon(7)));
        assert_eq!(once.len(), 38);

        solver.discard_common_slots();
        assert_eq!(solver.pool(), &once);
    }

    #[test]
    fn test_already_satisfied() {
        let grid = WeekGrid::default();
        let mut solver = SimpleSolver::new(
            WeeklySlotPool::new(&grid),
            SubjectRoster::default(),
            TeacherRoster::default(),
            RoomRoster::default(),
        );
        let solution = solver.evaluate_solution_serially(0).unwrap();
        assert_eq!(
            solution,
            Solution::Solved {
                lessons: vec![],
                rounds_used: 0
            }
        );
    }

    #[test]
    fn test_school_week_serial() {
        let mut solver = school_solver();
        let solution = solver.evaluate_solution_serially(200).unwrap();

        let Solution::Solved {
            lessons,
            rounds_used,
        } = solution
        else {
            panic!("expected solved");
        };
        assert_eq!(rounds_used, 8);
        assert_eq!(lessons.len(), 8);
        assert!(validate_lessons(&lessons).is_ok());
        assert_reservations_disjoint(&solver);

        for subject in solver.subjects().subjects() {
            assert!(subject.is_satisfied(), "{} unsatisfied", subject.id);
        }
        // Science only ever lands in the lab
        assert!(lessons
            .iter()
            .filter(|l| l.subject_id() == "science")
            .all(|l| l.room_id() == "Lab"));
    }

    #[test]
    fn test_remaining_time_never_increases() {
        let mut solver = school_solver();
        let mut previous = solver.subjects().total_remaining_minutes();

        for round in 0..40 {
            let before = snapshot(&solver);
            let outcome = solver.attempt_round(serial_strategy(round)).unwrap();
            let remaining = solver.subjects().total_remaining_minutes();
            assert!(remaining <= previous);

            match outcome {
                RoundOutcome::Placed(lessons) => {
                    let ids: BTreeSet<&str> = lessons.iter().map(|l| l.subject_id()).collect();
                    assert_eq!(ids.len(), lessons.len());
                }
                RoundOutcome::Failed(_) => assert_eq!(snapshot(&solver), before),
            }
            previous = remaining;
        }
    }

    #[test]
    fn test_random_mode_reproducible() {
        let mut a = school_solver();
        let mut b = school_solver();
        let config = SolverConfig::new(500).with_seed(7).with_group("8C");

        let first = a.solve(&config).unwrap();
        let second = b.solve(&config).unwrap();
        assert!(first.is_solved());
        assert_eq!(first, second);

        let lessons = first.lessons().unwrap();
        assert!(validate_lessons(lessons).is_ok());
        assert!(lessons.iter().all(|l| l.group() == Some("8C")));
        assert_reservations_disjoint(&a);
    }

    /// Proposes its first room no matter what it has assigned.
    #[derive(Debug)]
    struct CarelessRooms(Vec<Room>);

    impl RoomCatalog for CarelessRooms {
        fn common_slots(&self) -> BTreeSet<TimeSlot> {
            BTreeSet::new()
        }

        fn free_room_during(&self, _subject: &Subject, _slot: &ComposedSlot) -> Option<&Room> {
            self.0.first()
        }

        fn room_mut(&mut self, id: &str) -> Option<&mut Room> {
            self.0.iter_mut().find(|r| r.id == id)
        }
    }

    #[test]
    fn test_rejected_commit_is_fatal() {
        let grid = WeekGrid::default();
        let careless = || {
            SimpleSolver::new(
                WeeklySlotPool::new(&grid),
                SubjectRoster::new(vec![Subject::with_periods("math", 4, &grid)]),
                TeacherRoster::new(vec![Teacher::new("T1", &grid).with_subject("math")]),
                CarelessRooms(vec![Room::new("R1", &grid).with_unavailable([mon(0)])]),
            )
        };

        let err = careless().attempt_round(Strategy::CATALOG[7]).unwrap_err();
        assert_eq!(
            err,
            SolveError::AssignmentRejected {
                kind: ResourceKind::Room,
                id: "R1".into(),
                source: ReservationError::NotFree(mon(0)),
            }
        );

        let err = careless().evaluate_solution_serially(100).unwrap_err();
        assert!(matches!(
            err,
            SolveError::AssignmentRejected {
                kind: ResourceKind::Room,
                ..
            }
        ));
    }

    /// Hands out runs that are either gapped or one slot short.
    #[derive(Debug)]
    struct BrokenPool {
        gapped: bool,
    }

    impl SlotPool for BrokenPool {
        fn discard_slots(&mut self, _slots: &BTreeSet<TimeSlot>) {}

        fn pop_consecutive_slots(&mut self, n: usize) -> Option<Vec<TimeSlot>> {
            let run = if self.gapped {
                (0..n).map(|i| mon(2 * i as u8)).collect()
            } else {
                (0..n - 1).map(|i| mon(i as u8)).collect()
            };
            Some(run)
        }

        fn put_back_slots(&mut self, _slots: Vec<TimeSlot>) {}
    }

    fn broken_pool_solver(
        grid: &WeekGrid,
        gapped: bool,
    ) -> SimpleSolver<BrokenPool, SubjectRoster, TeacherRoster, RoomRoster> {
        SimpleSolver::new(
            BrokenPool { gapped },
            SubjectRoster::new(vec![Subject::with_periods("math", 4, grid)]),
            TeacherRoster::new(vec![Teacher::new("T1", grid).with_subject("math")]),
            RoomRoster::new(vec![Room::new("R1", grid)]),
        )
    }

    #[test]
    fn test_broken_run_is_fatal() {
        let grid = WeekGrid::default();

        // Round 0 uses {1,3}, a run of four
        let err = broken_pool_solver(&grid, true)
            .evaluate_solution_serially(100)
            .unwrap_err();
        assert_eq!(
            err,
            SolveError::BrokenRun(SlotError::NotConsecutive {
                previous: mon(0),
                next: mon(2),
            })
        );

        let mut short = broken_pool_solver(&grid, false);
        let err = short.evaluate_solution_serially(100).unwrap_err();
        assert_eq!(
            err,
            SolveError::BrokenRun(SlotError::LengthMismatch {
                expected: 4,
                actual: 3,
            })
        );
        // Nothing was committed before the loop stopped
        assert_eq!(short.subjects().get("math").unwrap().remaining_minutes(), 180);
    }

    /// Proposes subjects it cannot look up again for the commit.
    #[derive(Debug)]
    struct ForgetfulSubjects(Vec<Subject>);

    impl SubjectCatalog for ForgetfulSubjects {
        fn total_remaining_minutes(&self) -> i64 {
            self.0.iter().map(|s| s.remaining_minutes().max(0)).sum()
        }

        fn subject_suitable_for(&self, slot: &ComposedSlot) -> Option<&Subject> {
            self.0
                .iter()
                .find(|s| !s.is_satisfied() && s.is_free_during(slot))
        }

        fn subject_mut(&mut self, _id: &str) -> Option<&mut Subject> {
            None
        }
    }

    #[test]
    fn test_unknown_proposed_id_is_fatal() {
        let grid = WeekGrid::default();
        let mut solver = SimpleSolver::new(
            WeeklySlotPool::new(&grid),
            ForgetfulSubjects(vec![Subject::with_periods("math", 4, &grid)]),
            TeacherRoster::new(vec![Teacher::new("T1", &grid).with_subject("math")]),
            RoomRoster::new(vec![Room::new("R1", &grid)]),
        );

        let err = solver.evaluate_solution_serially(100).unwrap_err();
        assert_eq!(
            err,
            SolveError::UnknownResource {
                kind: ResourceKind::Subject,
                id: "math".into(),
            }
        );
        assert_eq!(solver.subjects().total_remaining_minutes(), 180);
        assert_eq!(solver.teachers().get("T1").unwrap().assigned_count(), 0);
    }
}
