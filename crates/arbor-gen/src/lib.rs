//! Arbor random tree generator.
//!
//! Synthesizes well-formed trees of a requested sort from a seeded,
//! caller-owned random source. Generation never reads global random state:
//! identical `(sort, max_depth, variables, seed)` always give identical
//! trees.
//!
//! ```text
//! let mut rng = StdRng::seed_from_u64(42);
//! let program = arbor_gen::generate(Sort::Stmt, 4, &["i", "j"], &mut rng)?;
//! ```

mod config;
mod error;
mod generator;

pub use config::{leaf_probability, GenConfig};
pub use error::{GenError, GenResult};
pub use generator::TreeGenerator;

use arbor_types::{Node, Sort};
use rand::Rng;

/// Generate a tree of `sort` with the default grammar configuration.
pub fn generate<R, S>(sort: Sort, max_depth: usize, variables: &[S], rng: &mut R) -> GenResult<Node>
where
    R: Rng,
    S: AsRef<str>,
{
    generate_at(sort, max_depth, variables, rng, 0)
}

/// Generate a tree of `sort` as if its root sat at `current_depth`.
pub fn generate_at<R, S>(
    sort: Sort,
    max_depth: usize,
    variables: &[S],
    rng: &mut R,
    current_depth: usize,
) -> GenResult<Node>
where
    R: Rng,
    S: AsRef<str>,
{
    generate_with_config(&GenConfig::default(), sort, max_depth, variables, rng, current_depth)
}

/// Generate with an explicit configuration.
#[tracing::instrument(level = "debug", skip(config, variables, rng), fields(vars = variables.len()))]
pub fn generate_with_config<R, S>(
    config: &GenConfig,
    sort: Sort,
    max_depth: usize,
    variables: &[S],
    rng: &mut R,
    current_depth: usize,
) -> GenResult<Node>
where
    R: Rng,
    S: AsRef<str>,
{
    let names: Vec<String> = variables.iter().map(|v| v.as_ref().to_string()).collect();
    let mut gen = TreeGenerator::new(rng, config, &names, max_depth)?;
    let tree = gen.generate_at(sort, current_depth);
    tracing::debug!(
        nodes = tree.node_count(),
        depth = tree.depth(),
        "generated tree"
    );
    Ok(tree)
}

/// Generate with the sort given by name (`"Expr"`, `"Bool"` or `"Stmt"`).
pub fn generate_named<R, S>(
    sort: &str,
    max_depth: usize,
    variables: &[S],
    rng: &mut R,
) -> GenResult<Node>
where
    R: Rng,
    S: AsRef<str>,
{
    let sort: Sort = sort
        .parse()
        .map_err(|_| GenError::UnknownSort(sort.to_string()))?;
    generate(sort, max_depth, variables, rng)
}
