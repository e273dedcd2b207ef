//! Maintenance commands. Their informational output may legitimately
//! vary, so only exit codes are compared.

use crate::policy::Equivalence;
use crate::session::Session;
use crate::Result;

pub(super) fn fsck(s: &mut Session<'_>) -> Result<()> {
    s.check("fsck", &["fsck"], Equivalence::ExitCode)?;
    Ok(())
}

pub(super) fn gc(s: &mut Session<'_>) -> Result<()> {
    s.check("gc", &["gc", "--quiet"], Equivalence::ExitCode)?;
    Ok(())
}
