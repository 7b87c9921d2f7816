use std::cmp::{max, min};
use std::sync::atomic::{AtomicBool, Ordering};

use log::{debug, info, trace};

use crate::constants::*;
use crate::coord::{PhaseOneNode, SymCoord, SymCoordTables};
use crate::cubie::{self, CubieCube};
use crate::error::Error;
use crate::facelet;
use crate::moves::{Move, MoveTables};
use crate::pruning::PruningTables;
use crate::scramble::{Solution, SolveOptions};
use crate::symmetries::SymmetriesTables;

static TABLES_READY: AtomicBool = AtomicBool::new(false);

lazy_static! {
    static ref SOLVERTABLES: SolverTables = SolverTables::new();
}

/// All data tables.
///
/// * `sy`: [SymmetriesTables]
/// * `mv`: [MoveTables]
/// * `ct`: [SymCoordTables]
/// * `pr`: [PruningTables]
pub struct SolverTables {
    pub sy: SymmetriesTables,
    pub mv: MoveTables,
    pub ct: SymCoordTables,
    pub pr: PruningTables,
}

impl SolverTables {
    fn new() -> Self {
        info!("Initializing solver tables...");
        let sy = SymmetriesTables::new();
        let mv = MoveTables::new();
        let ct = SymCoordTables::new(&sy, &mv);
        let pr = PruningTables::new(&mv, &ct);
        TABLES_READY.store(true, Ordering::Release);
        info!("Solver tables ready");
        Self { sy, mv, ct, pr }
    }

    fn phase1_node(&self, cc: &CubieCube) -> PhaseOneNode {
        let mut node = PhaseOneNode::from_cubie(cc, &self.ct);
        node.prun = self.pr.phase1(&self.sy, &self.ct, &node);
        node
    }

    fn phase1_move(&self, node: &PhaseOneNode, m: usize) -> PhaseOneNode {
        let mut next = node.apply(&self.sy, &self.mv, &self.ct, m);
        next.prun = self.pr.phase1(&self.sy, &self.ct, &next);
        next
    }
}

/// Build all tables now instead of on the first search. Calling it again does nothing.
pub fn initialize() {
    lazy_static::initialize(&SOLVERTABLES);
}

/// What the caller of a search step does next.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy)]
enum Step {
    /// A solution was accepted or the probe budget is spent.
    Stop,
    /// Try the next move.
    Continue,
    /// Skip the remaining powers of the current axis.
    SkipAxis,
}

/// Whether a search call starts over or first walks the path stored by the previous call.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
enum Resume {
    Fresh,
    Replay,
}

/// Restriction on the first phase 2 move.
#[derive(Debug, Clone, Copy)]
enum LastMove {
    /// The previous phase 2 move, `N_MOVE2` for none.
    After(usize),
    /// Only this phase 2 move is forbidden. A following half turn of the opposite face turns into `After`.
    Exclude(usize),
}

impl LastMove {
    fn blocks(self, m: usize, blocked: &[[bool; N_MOVE2]; N_MOVE2 + 1]) -> bool {
        match self {
            LastMove::After(last) => blocked[last][m],
            LastMove::Exclude(x) => m == x,
        }
    }

    fn next(self, m: usize) -> Self {
        match self {
            LastMove::Exclude(x) if m + 5 == x => LastMove::After(x),
            _ => LastMove::After(m),
        }
    }
}

/// A search root: the cube seen from one of the six axis frames, possibly with a pre-move applied.
#[derive(Debug, Default, Clone, Copy)]
struct Root {
    node: PhaseOneNode,
    cperm: SymCoord,
    slice_sorted: u16,
    u_edges: u16,
    d_edges: u16,
    /// D4h symmetries fixing the root.
    ssym: u64,
}

/// Combined turn of two moves of the same face, `None` if they cancel.
fn merge_turns(a: usize, b: usize) -> Option<usize> {
    let power = (a % 3 + b % 3 + 1) % 4;
    (power < 3).then(|| a / 3 * 3 + power)
}

/// A resumable solving session.
///
/// [Search::solve] returns the first solution found within the limits, [Search::next] continues the same search
/// for a shorter one.
pub struct Search {
    tables: &'static SolverTables,
    moves: [usize; MAX_SOLUTION_LENGTH + 1],
    roots: [[Root; 9]; 6],
    /// Symmetries of the input cube, used in optimal mode.
    self_sym: u64,
    conj_mask: u8,
    pre_idx_max: usize,
    urf_idx: usize,
    pre_idx: usize,
    length1: usize,
    depth1: usize,
    max_dep2: usize,
    sol: usize,
    probe: u64,
    probe_max: u64,
    probe_min: u64,
    options: SolveOptions,
    solution: Option<Solution>,
    resume: Resume,
    active: bool,
}

impl Default for Search {
    fn default() -> Self {
        Self::new()
    }
}

impl Search {
    /// A new session. Builds the tables if no session did so before.
    pub fn new() -> Self {
        Self {
            tables: &*SOLVERTABLES,
            moves: [0; MAX_SOLUTION_LENGTH + 1],
            roots: [[Root::default(); 9]; 6],
            self_sym: 0,
            conj_mask: 0,
            pre_idx_max: 1,
            urf_idx: 0,
            pre_idx: 0,
            length1: 0,
            depth1: 0,
            max_dep2: 0,
            sol: 0,
            probe: 0,
            probe_max: DEFAULT_PROBE_MAX,
            probe_min: DEFAULT_PROBE_MIN,
            options: SolveOptions::default(),
            solution: None,
            resume: Resume::Fresh,
            active: false,
        }
    }

    /// True once the shared tables are built.
    pub fn is_initialized() -> bool {
        TABLES_READY.load(Ordering::Acquire)
    }

    /// Phase 2 probes used by the last call.
    pub fn probes(&self) -> u64 {
        self.probe
    }

    /// Length of the best solution found so far, or the depth limit plus one.
    pub fn length(&self) -> usize {
        self.sol
    }

    /// Solve the cube given by its facelet string.
    pub fn solve_facelets(
        &mut self,
        cubestring: &str,
        max_depth: usize,
        probe_max: u64,
        probe_min: u64,
        options: SolveOptions,
    ) -> Result<Solution, Error> {
        let cc = facelet::parse_facelets(cubestring)?;
        self.solve(&cc, max_depth, probe_max, probe_min, options)
    }

    /// Find a solution of at most `max_depth` moves.
    ///
    /// # Parameters
    /// * `max_depth`: longest accepted solution, at most [MAX_SOLUTION_LENGTH].
    /// * `probe_max`: phase 2 attempts before giving up without a solution.
    /// * `probe_min`: phase 2 attempts to spend looking for shorter solutions after the first one.
    /// * `options`: output format and search mode.
    pub fn solve(
        &mut self,
        cc: &CubieCube,
        max_depth: usize,
        probe_max: u64,
        probe_min: u64,
        options: SolveOptions,
    ) -> Result<Solution, Error> {
        cc.verify()?;
        self.sol = min(max_depth, MAX_SOLUTION_LENGTH) + 1;
        self.probe = 0;
        self.probe_max = probe_max;
        self.probe_min = min(probe_min, probe_max);
        self.options = options;
        self.solution = None;
        self.resume = Resume::Fresh;
        self.active = true;
        self.length1 = 0;
        self.depth1 = 0;
        self.urf_idx = 0;
        self.pre_idx = 0;

        if cc.is_solved() {
            self.sol = 0;
            let solution = self.make_solution();
            self.solution = Some(solution.clone());
            return Ok(solution);
        }
        self.init_roots(cc);
        self.run()
    }

    /// Continue the last search for a solution shorter than the previous one.
    ///
    /// Switching between optimal and two-phase mode restarts the search, keeping the length bound.
    pub fn next(&mut self, probe_max: u64, probe_min: u64, options: SolveOptions) -> Result<Solution, Error> {
        if !self.active {
            return Err(Error::NoActiveSearch);
        }
        self.probe = 0;
        self.probe_max = probe_max;
        self.probe_min = min(probe_min, probe_max);
        self.solution = None;
        let same_mode =
            self.options.contains(SolveOptions::OPTIMAL_SOLUTION) == options.contains(SolveOptions::OPTIMAL_SOLUTION);
        self.resume = if same_mode { Resume::Replay } else { Resume::Fresh };
        self.options = options;
        self.run()
    }

    fn replaying(&self) -> bool {
        self.resume == Resume::Replay
    }

    fn run(&mut self) -> Result<Solution, Error> {
        if self.options.contains(SolveOptions::OPTIMAL_SOLUTION) {
            self.search_optimal()
        } else {
            self.search()
        }
    }

    fn result(&self, step: Step) -> Result<Solution, Error> {
        match (&self.solution, step) {
            (Some(solution), _) => Ok(solution.clone()),
            (None, Step::Stop) => Err(Error::ProbeLimit),
            (None, _) => Err(Error::NoSolution),
        }
    }

    fn init_roots(&mut self, cc: &CubieCube) {
        let t = self.tables;
        let move_cube = cubie::move_cubes();
        let inverse = cc.inverse_cubie_cube();
        let mut rooted = [CubieCube::default(); 6];
        for (u, root) in rooted.iter_mut().enumerate() {
            let base = if u < 3 { cc } else { &inverse };
            *root = t.sy.conj(base, N_SYM_D4H * (u % 3));
        }

        self.conj_mask = 0;
        for i in 0..6 {
            for j in 0..i {
                if self.conj_mask & 1 << j == 0 && t.sy.is_d4h_conjugate(&rooted[j], &rooted[i]) {
                    self.conj_mask |= 1 << i;
                    break;
                }
            }
        }
        self.pre_idx_max = if self.conj_mask & 0x38 != 0 { 1 } else { PRE_MOVES.len() };
        self.self_sym = t.sy.self_symmetry(cc, N_SYM);

        for (u, root_cube) in rooted.iter().enumerate() {
            let ssym = t.sy.self_symmetry(root_cube, N_SYM_D4H);
            for (p, pre) in PRE_MOVES.iter().enumerate().take(self.pre_idx_max) {
                let (c, ssym) = match pre {
                    None => (*root_cube, ssym),
                    Some(pre) => {
                        let mut c = move_cube[*pre as usize];
                        c.multiply(*root_cube);
                        (c, ssym & t.sy.move_cube_sym[*pre as usize])
                    }
                };
                self.roots[u][p] = Root {
                    node: t.phase1_node(&c),
                    cperm: t.ct.cperm.raw_to_sym[c.get_corners() as usize],
                    slice_sorted: c.get_slice_sorted(),
                    u_edges: c.get_u_edges(),
                    d_edges: c.get_d_edges(),
                    ssym,
                };
            }
        }
    }

    fn search(&mut self) -> Result<Solution, Error> {
        if !self.replaying() {
            self.length1 = 0;
            self.urf_idx = 0;
            self.pre_idx = 0;
        }
        while self.length1 < self.sol {
            self.max_dep2 = min(MAX_DEPTH2, self.sol - self.length1);
            while self.urf_idx < 6 {
                if self.conj_mask & 1 << self.urf_idx == 0 {
                    while self.pre_idx < self.pre_idx_max {
                        if self.pre_idx == 0 || self.pre_idx % 2 == 1 {
                            if self.search_root() == Step::Stop {
                                return self.result(Step::Stop);
                            }
                        }
                        self.pre_idx += 1;
                    }
                }
                self.pre_idx = 0;
                self.urf_idx += 1;
            }
            self.urf_idx = 0;
            self.length1 += 1;
        }
        self.result(Step::Continue)
    }

    /// Phase 1 from the current root at the current length.
    fn search_root(&mut self) -> Step {
        let root = self.roots[self.urf_idx][self.pre_idx];
        if self.pre_idx != 0 && self.length1 == 0 {
            return Step::Continue;
        }
        self.depth1 = self.length1 - usize::from(self.pre_idx != 0);
        if root.node.prun as usize > self.depth1 {
            self.resume = Resume::Fresh;
            return Step::Continue;
        }
        let step = self.phase1(root.node, root.ssym, self.depth1, None);
        self.resume = Resume::Fresh;
        step
    }

    fn phase1(&mut self, node: PhaseOneNode, ssym: u64, maxl: usize, last_axis: Option<usize>) -> Step {
        if node.prun == 0 && maxl < 5 {
            return if maxl == 0 { self.init_phase2_pre() } else { Step::Continue };
        }
        let t = self.tables;
        let skip = t.sy.skip_moves(ssym);
        let at = self.depth1 - maxl;
        for axis in (0..N_MOVE).step_by(3) {
            if let Some(last) = last_axis {
                if axis == last || axis + 9 == last {
                    continue;
                }
            }
            if self.replaying() && axis + 2 < self.moves[at] {
                continue;
            }
            for m in axis..axis + 3 {
                if self.replaying() && m != self.moves[at] || skip & 1 << m != 0 {
                    continue;
                }
                let child = t.phase1_move(&node, m);
                let prun = child.prun as usize;
                if prun > maxl {
                    break;
                } else if prun == maxl {
                    continue;
                }
                self.moves[at] = m;
                match self.phase1(child, ssym & t.sy.move_cube_sym[m], maxl - 1, Some(axis)) {
                    Step::Stop => return Step::Stop,
                    Step::SkipAxis => break,
                    Step::Continue => {}
                }
            }
        }
        Step::Continue
    }

    /// Phase 2 for the current root and its paired pre-move root, which share the phase 1 coordinates.
    fn init_phase2_pre(&mut self) -> Step {
        let step = self.init_phase2();
        if self.pre_idx == 0 || step == Step::Stop {
            return step;
        }
        self.pre_idx += 1;
        let paired = self.init_phase2();
        self.pre_idx -= 1;
        min(step, paired)
    }

    fn search_optimal(&mut self) -> Result<Solution, Error> {
        let prun = |u: usize| self.roots[u][0].node.prun;
        let maxprun1 = (0..3).map(prun).max().unwrap_or(0);
        let maxprun2 = (3..6).map(prun).max().unwrap_or(0);
        self.urf_idx = if maxprun2 > maxprun1 { 3 } else { 0 };
        self.pre_idx = 0;
        if !self.replaying() {
            self.length1 = 0;
        }
        let u = self.urf_idx;
        let nodes = [self.roots[u][0].node, self.roots[u + 1][0].node, self.roots[u + 2][0].node];
        while self.length1 < self.sol {
            self.depth1 = self.length1;
            if nodes.iter().all(|n| n.prun as usize <= self.length1) {
                let step = self.phase1_opt(nodes, self.self_sym, self.length1, None);
                self.resume = Resume::Fresh;
                if step == Step::Stop {
                    return self.result(Step::Stop);
                }
            } else {
                self.resume = Resume::Fresh;
            }
            self.length1 += 1;
        }
        self.result(Step::Continue)
    }

    /// Phase 1 tracking the cube from all three axes. `nodes` are the UD, RL and FB frames.
    fn phase1_opt(&mut self, nodes: [PhaseOneNode; 3], ssym: u64, maxl: usize, last_axis: Option<usize>) -> Step {
        if maxl < 5 && nodes.iter().all(|n| n.prun == 0) {
            self.max_dep2 = maxl + 1;
            self.depth1 -= maxl;
            let step = self.init_phase2();
            self.depth1 += maxl;
            return step;
        }
        let t = self.tables;
        let skip = t.sy.skip_moves(ssym);
        let at = self.depth1 - maxl;
        for axis in (0..N_MOVE).step_by(3) {
            if let Some(last) = last_axis {
                if axis == last || axis + 9 == last {
                    continue;
                }
            }
            if self.replaying() && axis + 2 < self.moves[at] {
                continue;
            }
            for m in axis..axis + 3 {
                if self.replaying() && m != self.moves[at] || skip & 1 << m != 0 {
                    continue;
                }
                let ud = t.phase1_move(&nodes[0], m);
                let prun_ud = ud.prun as usize;
                if prun_ud > maxl {
                    break;
                } else if prun_ud == maxl {
                    continue;
                }
                let m_rl = t.sy.urf_conj_move(m);
                let rl = t.phase1_move(&nodes[1], m_rl);
                let prun_rl = rl.prun as usize;
                if prun_rl > maxl {
                    break;
                } else if prun_rl == maxl {
                    continue;
                }
                let fb = t.phase1_move(&nodes[2], t.sy.urf_conj_move(m_rl));
                let mut prun_fb = fb.prun as usize;
                if prun_ud == prun_rl && prun_rl == prun_fb && prun_fb != 0 {
                    prun_fb += 1;
                }
                if prun_fb > maxl {
                    break;
                } else if prun_fb == maxl {
                    continue;
                }
                self.moves[at] = m;
                if self.phase1_opt([ud, rl, fb], ssym & t.sy.move_cube_sym[m], maxl - 1, Some(axis)) == Step::Stop {
                    return Step::Stop;
                }
            }
        }
        Step::Continue
    }

    /// Project the phase 1 path into phase 2 and search the remaining moves.
    fn init_phase2(&mut self) -> Step {
        self.resume = Resume::Fresh;
        let t = self.tables;
        let (sy, mv, ct, pr) = (&t.sy, &t.mv, &t.ct, &t.pr);
        let root = self.roots[self.urf_idx][self.pre_idx];
        let path = &self.moves[..self.depth1];

        let mut cperm = root.cperm;
        let mut slice_sorted = root.slice_sorted as usize;
        for &m in path {
            cperm = ct.move_cperm(sy, cperm, m);
            slice_sorted = mv.slice_sorted_move[N_MOVE * slice_sorted + m] as usize;
        }
        let mperm = slice_sorted % N_PERM_4;
        let prun = pr.mcperm(ct, cperm, mperm) as usize;
        if prun >= self.max_dep2 {
            return if prun > self.max_dep2 { Step::SkipAxis } else { Step::Continue };
        }

        let (mut u_edges, mut d_edges) = (root.u_edges as usize, root.d_edges as usize);
        for &m in path {
            u_edges = mv.u_edges_move[N_MOVE * u_edges + m] as usize;
            d_edges = mv.d_edges_move[N_MOVE * d_edges + m] as usize;
        }
        let eperm = ct.merge_edges(u_edges as u16, d_edges as u16);
        let prun = max(
            prun,
            max(pr.meperm(ct, eperm, mperm), pr.eperm_ccomb(sy, ct, cperm, eperm)) as usize,
        );
        if prun >= self.max_dep2 {
            return if prun > self.max_dep2 { Step::SkipAxis } else { Step::Continue };
        }

        let limit = if self.solution.is_none() { self.probe_max } else { self.probe_min };
        if self.probe >= limit {
            trace!("Probe limit {} reached", limit);
            return Step::Stop;
        }
        self.probe += 1;

        let d1 = self.depth1;
        let last = if d1 >= 2 && self.moves[d1 - 1] / 3 % 3 == self.moves[d1 - 2] / 3 % 3 {
            LastMove::After(STD_TO_UD[max(self.moves[d1 - 1], self.moves[d1 - 2]) / 3 * 3 + 1])
        } else if d1 >= 1 {
            let half = STD_TO_UD[self.moves[d1 - 1] / 3 * 3 + 1];
            if self.moves[d1 - 1] > Move::F3 as usize {
                LastMove::Exclude(half)
            } else {
                LastMove::After(half)
            }
        } else {
            LastMove::After(N_MOVE2)
        };

        let mut found = false;
        let mut depth2 = self.max_dep2 - 1;
        while depth2 >= prun {
            let surplus = match self.phase2(cperm, eperm, mperm, depth2, d1, last) {
                Some(surplus) => surplus,
                None => break,
            };
            depth2 -= surplus;
            self.sol = d1 + depth2;
            self.merge_pre_move(depth2);
            let solution = self.make_solution();
            debug!("Found solution of length {} after {} probes: {}", self.sol, self.probe, solution);
            self.solution = Some(solution);
            found = true;
            if depth2 == 0 {
                break;
            }
            depth2 -= 1;
        }

        if !found {
            return Step::Continue;
        }
        self.max_dep2 = min(MAX_DEPTH2, self.sol.saturating_sub(self.length1));
        if self.probe >= self.probe_min {
            Step::Stop
        } else {
            Step::Continue
        }
    }

    /// Append the pre-move of the current root to the solution, merged with a neighbouring turn of the same face.
    fn merge_pre_move(&mut self, depth2: usize) {
        let pre = match PRE_MOVES[self.pre_idx] {
            Some(pre) => pre as usize,
            None => return,
        };
        let sol = self.sol;
        let last = self.moves[sol - 1];
        if depth2 > 0 && pre / 3 == last / 3 {
            match merge_turns(pre, last) {
                Some(m) => self.moves[sol - 1] = m,
                None => self.sol -= 1,
            }
        } else if depth2 > 1 && pre / 3 % 3 == last / 3 % 3 && self.moves[sol - 2] / 3 == pre / 3 {
            match merge_turns(pre, self.moves[sol - 2]) {
                Some(m) => self.moves[sol - 2] = m,
                None => {
                    self.moves[sol - 2] = last;
                    self.sol -= 1;
                }
            }
        } else {
            self.moves[sol] = pre;
            self.sol += 1;
        }
    }

    /// Depth first search over the phase 2 moves. Returns the unused depth if the cube is solved within `maxl`.
    fn phase2(
        &mut self,
        cperm: SymCoord,
        eperm: SymCoord,
        mperm: usize,
        maxl: usize,
        depth: usize,
        last: LastMove,
    ) -> Option<usize> {
        if cperm.class() == 0 && eperm.class() == 0 && mperm == 0 {
            return Some(maxl);
        }
        let t = self.tables;
        let (sy, ct, pr) = (&t.sy, &t.ct, &t.pr);
        for m in 0..N_MOVE2 {
            if last.blocks(m, &t.mv.phase2_blocked) {
                continue;
            }
            let mperm1 = ct.mperm_move[N_MOVE2 * mperm + m] as usize;
            let cperm1 = ct.move_cperm(sy, cperm, UD_MOVES[m] as usize);
            if pr.mcperm(ct, cperm1, mperm1) as usize >= maxl {
                continue;
            }
            let eperm1 = ct.move_eperm(sy, eperm, m);
            if pr.eperm_ccomb(sy, ct, cperm1, eperm1) as usize >= maxl
                || pr.meperm(ct, eperm1, mperm1) as usize >= maxl
            {
                continue;
            }
            if let Some(surplus) = self.phase2(cperm1, eperm1, mperm1, maxl - 1, depth + 1, last.next(m)) {
                self.moves[depth] = UD_MOVES[m] as usize;
                return Some(surplus);
            }
        }
        None
    }

    /// Render the first `sol` moves in the frame of the input cube.
    fn make_solution(&self) -> Solution {
        let urf = if self.options.contains(SolveOptions::INVERSE_SOLUTION) {
            (self.urf_idx + 3) % 6
        } else {
            self.urf_idx
        };
        let table = &self.tables.sy.urf_move[urf];
        let path = &self.moves[..self.sol];
        let moves: Vec<Move> = if urf < 3 {
            path.iter().map(|&m| ALL_MOVES[table[m]]).collect()
        } else {
            path.iter().rev().map(|&m| ALL_MOVES[table[m]]).collect()
        };
        let separator = if self.options.contains(SolveOptions::USE_SEPARATOR) && self.depth1 < self.sol {
            Some(if urf < 3 { self.depth1 } else { self.sol - self.depth1 })
        } else {
            None
        };
        Solution {
            moves,
            separator,
            append_length: self.options.contains(SolveOptions::APPEND_LENGTH),
        }
    }
}

/// Solve a cube defined by cubestring to a position defined by goalstring.
///
/// # Parameters
/// * `cubestring`: facelet string of the cube, see [facelet::FaceCube].
/// * `goalstring`: facelet string of the position to reach.
/// * `max_depth`: longest accepted solution.
/// * `probe_max`: phase 2 attempts before giving up.
/// * `probe_min`: phase 2 attempts spent on improving the first solution.
/// * `options`: see [SolveOptions].
///
/// # Examples
/// ```rust,no_run
/// use twophase::{solver, SolveOptions};
///
/// let solution = solver(
///     "RLLBUFUUUBDURRBBUBRLRRFDFDDLLLUDFLRRDDFRLFDBUBFFLBBDUF",
///     "UUUUUUUUURRRRRRRRRFFFFFFFFFDDDDDDDDDLLLLLLLLLBBBBBBBBB",
///     21,
///     100_000,
///     0,
///     SolveOptions::default(),
/// )
/// .unwrap();
/// println!("{} ({})", solution, solution.len());
/// ```
pub fn solver(
    cubestring: &str,
    goalstring: &str,
    max_depth: usize,
    probe_max: u64,
    probe_min: u64,
    options: SolveOptions,
) -> Result<Solution, Error> {
    let cc0 = facelet::parse_facelets(cubestring)?;
    let ccg = facelet::parse_facelets(goalstring)?;
    // cc0 * S = ccg  <=> (ccg^-1 * cc0) * S = Id
    let mut cc = ccg.inverse_cubie_cube();
    cc.multiply(cc0);
    Search::new().solve(&cc, max_depth, probe_max, probe_min, options)
}

/// Solve a cube defined by its cube definition string.
///
/// # Examples
/// ```rust,no_run
/// use twophase::{solve, SolveOptions};
///
/// let solution = solve(
///     "DUUBULDBFRBFRRULLLBRDFFFBLURDBFDFDRFRULBLUFDURRBLBDUDL",
///     21,
///     100_000,
///     0,
///     SolveOptions::USE_SEPARATOR | SolveOptions::APPEND_LENGTH,
/// )
/// .unwrap();
/// println!("{}", solution);
/// ```
pub fn solve(
    cubestring: &str,
    max_depth: usize,
    probe_max: u64,
    probe_min: u64,
    options: SolveOptions,
) -> Result<Solution, Error> {
    solver(cubestring, SOLVED_FACELETS, max_depth, probe_max, probe_min, options)
}

#[cfg(test)]
mod test {
    use crate::error::Error;
    use crate::facelet::FaceCube;
    use crate::moves::Move::*;
    use crate::scramble::scramble_from_str;
    use crate::solver::*;

    fn scrambled(scramble: &str) -> CubieCube {
        let moves = scramble_from_str(scramble).unwrap();
        CubieCube::from(moves.as_slice())
    }

    #[test]
    fn test_merge_turns() {
        assert_eq!(merge_turns(R as usize, R2 as usize), Some(R3 as usize));
        assert_eq!(merge_turns(R3 as usize, R3 as usize), Some(R2 as usize));
        assert_eq!(merge_turns(F as usize, F3 as usize), None);
        assert_eq!(merge_turns(B3 as usize, B2 as usize), Some(B as usize));
    }

    #[test]
    fn test_last_move() {
        let search = Search::new();
        let blocked = &search.tables.mv.phase2_blocked;
        let d2 = 6;
        let excl = LastMove::Exclude(d2);
        assert!(excl.blocks(d2, blocked));
        assert!(!excl.blocks(5, blocked));
        // U2 after an excluded D2 behaves as if D2 was the last move
        assert!(matches!(excl.next(1), LastMove::After(6)));
        assert!(matches!(excl.next(0), LastMove::After(0)));
        assert!(!LastMove::After(N_MOVE2).blocks(0, blocked));
    }

    #[test]
    fn test_solved() {
        let mut search = Search::new();
        let solution = search
            .solve(&CubieCube::default(), 21, 1000, 0, SolveOptions::APPEND_LENGTH)
            .unwrap();
        assert!(solution.is_empty());
        assert_eq!(search.probes(), 0);
        assert_eq!(solution.to_string(), "(0f)");
        assert!(Search::is_initialized());
    }

    #[test]
    fn test_solve_scrambles() {
        let mut search = Search::new();
        for scramble in [
            "R U R' U'",
            "F2 D' L2 B R' U2 F",
            "D2 R' F2 U L B' D R2 F U' B2 L' D F2 R U2 L",
            "U F' D2 R B L' U2 F R' D B2 L U' F2",
        ] {
            let cc = scrambled(scramble);
            let solution = search.solve(&cc, 21, 100_000, 0, SolveOptions::default()).unwrap();
            assert!(solution.len() <= 21);
            assert!(cc.apply_moves(&solution.moves).is_solved(), "{}: {}", scramble, solution);
            assert!(search.probes() >= 1);
        }
    }

    #[test]
    fn test_inverse_solution() {
        let cc = scrambled("L2 F' U B2 D R' F L U2 B'");
        let solution = Search::new()
            .solve(&cc, 21, 100_000, 0, SolveOptions::INVERSE_SOLUTION)
            .unwrap();
        assert_eq!(CubieCube::default().apply_moves(&solution.moves), cc);
    }

    #[test]
    fn test_separator() {
        let cc = scrambled("R U F D L B R2 U2");
        let solution = Search::new()
            .solve(&cc, 21, 100_000, 0, SolveOptions::USE_SEPARATOR | SolveOptions::APPEND_LENGTH)
            .unwrap();
        let text = solution.to_string();
        assert!(text.ends_with(&format!("({}f)", solution.len())));
        if let Some(sep) = solution.separator {
            assert!(sep <= solution.len());
            assert!(text.contains('.'));
        }
    }

    #[test]
    fn test_short_optimal() {
        let mut search = Search::new();
        for scramble in ["R", "U2 F'", "R U F'", "L D2 B' R2 U"] {
            let cc = scrambled(scramble);
            let n = scramble.split_whitespace().count();
            let solution = search
                .solve(&cc, 21, 1_000_000, 0, SolveOptions::OPTIMAL_SOLUTION)
                .unwrap();
            assert!(solution.len() <= n, "{}: {}", scramble, solution);
            assert!(cc.apply_moves(&solution.moves).is_solved());
        }
        let solution = search
            .solve(&scrambled("F'"), 21, 1000, 0, SolveOptions::OPTIMAL_SOLUTION)
            .unwrap();
        assert_eq!(solution.moves, vec![F]);
    }

    fn set_path(search: &mut Search, pre_idx: usize, path: &[Move]) {
        search.pre_idx = pre_idx;
        for (i, &m) in path.iter().enumerate() {
            search.moves[i] = m as usize;
        }
        search.sol = path.len();
    }

    fn path(search: &Search) -> Vec<Move> {
        search.moves[..search.sol].iter().map(|&m| ALL_MOVES[m]).collect()
    }

    #[test]
    fn test_merge_pre_move() {
        let mut search = Search::new();
        // pre-move 1 is R, 2 is R'
        set_path(&mut search, 1, &[U, R2]);
        search.merge_pre_move(1);
        assert_eq!(path(&search), vec![U, R3]);

        set_path(&mut search, 1, &[U, R2, L2]);
        search.merge_pre_move(2);
        assert_eq!(path(&search), vec![U, R3, L2]);

        set_path(&mut search, 1, &[U, F2]);
        search.merge_pre_move(1);
        assert_eq!(path(&search), vec![U, F2, R]);

        set_path(&mut search, 2, &[U, R]);
        search.merge_pre_move(1);
        assert_eq!(path(&search), vec![U]);

        set_path(&mut search, 2, &[U, R, L2]);
        search.merge_pre_move(2);
        assert_eq!(path(&search), vec![U, L2]);

        // the last phase 1 move is never changed
        set_path(&mut search, 1, &[R]);
        search.merge_pre_move(0);
        assert_eq!(path(&search), vec![R, R]);

        set_path(&mut search, 0, &[U, R2]);
        search.merge_pre_move(1);
        assert_eq!(path(&search), vec![U, R2]);
    }

    #[test]
    fn test_symmetric_cubes() {
        let mut search = Search::new();
        let mut superflip = CubieCube::default();
        superflip.eo = [1; 12];
        let cubes = [
            scrambled("U2 D2 R2 L2 F2 B2"),
            scrambled("U D'"),
            scrambled("R2 L2"),
            superflip,
        ];
        for cc in cubes {
            let solution = search.solve(&cc, 24, 100_000, 0, SolveOptions::default()).unwrap();
            assert!(cc.apply_moves(&solution.moves).is_solved(), "{}", solution);
            assert_ne!(search.conj_mask, 0);
            let solution = search
                .solve(&cc, 24, 100_000, 0, SolveOptions::INVERSE_SOLUTION)
                .unwrap();
            assert_eq!(CubieCube::default().apply_moves(&solution.moves), cc);
        }

        // the checkerboard is fixed by every symmetry and is its own inverse
        search
            .solve(&cubes[0], 21, 100_000, 0, SolveOptions::default())
            .unwrap();
        assert_eq!(search.conj_mask, 0x3e);
        assert_eq!(search.pre_idx_max, 1);
        assert_eq!(search.roots[0][0].ssym, 0xffff);

        // U D' turned upside down is its inverse
        search
            .solve(&cubes[1], 21, 100_000, 0, SolveOptions::default())
            .unwrap();
        assert_ne!(search.conj_mask & 0x38, 0);
        assert_eq!(search.pre_idx_max, 1);

        let cc = scrambled("R U F' L2 D B");
        search.solve(&cc, 21, 100_000, 0, SolveOptions::default()).unwrap();
        assert_eq!(search.conj_mask, 0);
        assert_eq!(search.pre_idx_max, PRE_MOVES.len());
    }

    #[test]
    fn test_errors() {
        let mut search = Search::new();
        assert!(matches!(
            search.next(1000, 0, SolveOptions::default()),
            Err(Error::NoActiveSearch)
        ));

        let cc = scrambled("R U F D L B");
        let err = search.solve(&cc, 3, 100_000, 0, SolveOptions::default()).unwrap_err();
        assert!(matches!(err, Error::NoSolution));
        assert_eq!(err.code(), 7);

        let err = search.solve(&cc, 21, 0, 0, SolveOptions::default()).unwrap_err();
        assert!(matches!(err, Error::ProbeLimit));
        assert_eq!(err.code(), 8);

        let mut parity = CubieCube::default();
        parity.ep.swap(0, 1);
        let err = search.solve(&parity, 21, 1000, 0, SolveOptions::default()).unwrap_err();
        assert_eq!(err.code(), 6);
    }

    #[test]
    fn test_next_not_longer() {
        let cc = scrambled("B' R2 D F' L U2 R' B D2 F L' U B2 R D'");
        let mut search = Search::new();
        let first = search.solve(&cc, 24, 100_000, 0, SolveOptions::default()).unwrap();
        let mut best = first.len();
        for _ in 0..3 {
            match search.next(1000, 1000, SolveOptions::default()) {
                Ok(solution) => {
                    assert!(solution.len() < best);
                    assert!(cc.apply_moves(&solution.moves).is_solved());
                    best = solution.len();
                }
                Err(e) => {
                    assert!(matches!(e, Error::ProbeLimit | Error::NoSolution));
                    break;
                }
            }
        }
        assert_eq!(search.length(), best);
    }

    #[test]
    fn test_goal_state() {
        let state = scrambled("R U2 F' D");
        let goal = scrambled("L B2");
        let solution = solver(
            &FaceCube::from(&state).to_string(),
            &FaceCube::from(&goal).to_string(),
            21,
            100_000,
            0,
            SolveOptions::default(),
        )
        .unwrap();
        assert_eq!(state.apply_moves(&solution.moves), goal);
        let solved = solve(SOLVED_FACELETS, 21, 1000, 0, SolveOptions::default()).unwrap();
        assert!(solved.is_empty());
    }
}
