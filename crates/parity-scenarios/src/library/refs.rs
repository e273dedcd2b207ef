use crate::policy::Equivalence;
use crate::session::Session;
use crate::Result;

pub(super) fn branch(s: &mut Session<'_>) -> Result<()> {
    for name in ["feature-1", "feature-2"] {
        s.step(&["branch", name])?;
    }
    s.check("branch", &["branch", "--list"], Equivalence::normalized())?;
    Ok(())
}

pub(super) fn checkout(s: &mut Session<'_>) -> Result<()> {
    let main = s.primary_branch();

    s.checkout("feature-1")?;
    s.check("checkout", &["rev-parse", "--abbrev-ref", "HEAD"], Equivalence::normalized())?;
    s.checkout(&main)?;
    Ok(())
}
