use std::env;
use std::path::PathBuf;

fn main() {
    println!("cargo:rerun-if-env-changed=MECO_APPLICATION_PATH_HINT");

    let hint = env::var("MECO_APPLICATION_PATH_HINT").ok();

    if let Some(raw_hint) = hint {
        let joined = env::split_paths(&raw_hint)
            .map(|candidate| candidate.canonicalize().unwrap_or(candidate))
            .collect::<Vec<PathBuf>>();
        if let Ok(joined) = env::join_paths(joined) {
            println!(
                "cargo:rustc-env=MECO_APPLICATION_PATH_HINT={}",
                joined.to_string_lossy()
            );
        }
    }
}
