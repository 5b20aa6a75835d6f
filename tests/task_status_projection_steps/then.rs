//! Then steps for task status projection scenarios.

use super::world::ProjectionWorld;
use rstest_bdd_macros::then;

#[then(r#"the projected status is "{status}""#)]
fn projected_status_is(world: &ProjectionWorld, status: String) -> Result<(), eyre::Report> {
    let projected = world
        .projected
        .ok_or_else(|| eyre::eyre!("missing projected status"))?;

    if projected.as_str() != status {
        return Err(eyre::eyre!(
            "expected status {status}, found {}",
            projected.as_str()
        ));
    }

    Ok(())
}
