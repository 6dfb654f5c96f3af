//! Embeds the build timestamp and git metadata read by `psychoguard::version`.

use vergen_gitcl::{Build, Emitter, Gitcl};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let timestamp = Build::builder().build_timestamp(true).build();
    let git = Gitcl::builder().branch(true).sha(true).dirty(true).build();

    Emitter::default()
        .add_instructions(&timestamp)?
        .add_instructions(&git)?
        .emit()?;

    Ok(())
}
