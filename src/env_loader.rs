use std::env;
use std::path::PathBuf;

fn fallback_dotenv_path(
    vault_home: Option<PathBuf>,
    home_dir: Option<PathBuf>,
) -> Option<PathBuf> {
    if let Some(base) = vault_home {
        return Some(base.join(".env"));
    }
    Some(home_dir?.join(".arcvault/.env"))
}

pub fn load_dotenv() {
    if dotenvy::dotenv().is_ok() {
        return;
    }

    let fallback = fallback_dotenv_path(
        env::var_os("ARCVAULT_HOME").map(PathBuf::from),
        dirs::home_dir(),
    );

    let Some(path) = fallback else {
        return;
    };
    if path.is_file() {
        let _ = dotenvy::from_path(&path);
    }
}

#[cfg(test)]
mod tests {
    use super::fallback_dotenv_path;
    use std::path::PathBuf;

    #[test]
    fn vault_home_takes_precedence() {
        let got = fallback_dotenv_path(
            Some(PathBuf::from("/srv/arcvault")),
            Some(PathBuf::from("/home/alice")),
        );
        assert_eq!(got, Some(PathBuf::from("/srv/arcvault/.env")));
    }

    #[test]
    fn home_dir_is_the_fallback() {
        let got = fallback_dotenv_path(None, Some(PathBuf::from("/home/alice")));
        assert_eq!(got, Some(PathBuf::from("/home/alice/.arcvault/.env")));
    }
}
