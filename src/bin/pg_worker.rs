//! Runs embedded `PostgreSQL` lifecycle steps as an unprivileged user.
//!
//! ```text
//! pg_worker <setup|start|stop> <payload.json>
//! ```
//!
//! The repository test harness invokes this binary when it runs as root,
//! since `PostgreSQL` refuses to run under the superuser account. The payload
//! is a `pg_embedded_setup_unpriv` worker payload: cluster settings plus
//! environment overrides. When started as root the worker re-executes itself
//! as `nobody` and then applies the requested step.

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[cfg(unix)]
fn main() -> Result<(), BoxError> {
    unix::main()
}

#[cfg(not(unix))]
fn main() -> Result<(), BoxError> {
    Err("pg_worker is only supported on Unix platforms".into())
}

#[cfg(unix)]
mod unix {
    use super::BoxError;
    use camino::{Utf8Path, Utf8PathBuf};
    use nix::unistd::{Uid, User, initgroups, setgid, setuid};
    use pg_embedded_setup_unpriv::ambient_dir_and_path;
    use pg_embedded_setup_unpriv::worker::{PlainSecret, WorkerPayload};
    use postgresql_embedded::{PostgreSQL, Status};
    use std::env;
    use std::ffi::CString;
    use std::io::Read;
    use std::process::{Command, ExitStatus};
    use thiserror::Error;

    const REEXEC_ENV: &str = "TODO_PG_WORKER_REEXEC";
    const TRUSTED_PATH: &str = "/usr/sbin:/usr/bin:/sbin:/bin";
    const SERVICE_USER: &str = "nobody";

    #[derive(Debug, Error)]
    enum WorkerError {
        #[error("usage: pg_worker <setup|start|stop> <payload.json>: {0}")]
        Usage(String),
        #[error("failed to read payload: {0}")]
        PayloadRead(#[source] BoxError),
        #[error("failed to parse payload: {0}")]
        PayloadParse(#[source] serde_json::Error),
        #[error("invalid cluster settings: {0}")]
        Settings(String),
        #[error("failed to build runtime: {0}")]
        Runtime(#[source] std::io::Error),
        #[error("failed to drop privileges: {0}")]
        Privileges(String),
        #[error("postgres {step} failed: {message}")]
        Postgres { step: &'static str, message: String },
    }

    #[derive(Debug, Clone, Copy)]
    enum Step {
        Setup,
        Start,
        Stop,
    }

    impl TryFrom<&str> for Step {
        type Error = WorkerError;

        fn try_from(value: &str) -> Result<Self, Self::Error> {
            match value {
                "setup" => Ok(Self::Setup),
                "start" => Ok(Self::Start),
                "stop" => Ok(Self::Stop),
                other => Err(WorkerError::Usage(format!("unknown step '{other}'"))),
            }
        }
    }

    pub(super) fn main() -> Result<(), BoxError> {
        let args = utf8_args()?;
        reexec_unprivileged(&args)?;
        run(&args).map_err(Into::into)
    }

    fn utf8_args() -> Result<Vec<Utf8PathBuf>, WorkerError> {
        env::args_os()
            .map(|arg| {
                arg.into_string()
                    .map(Utf8PathBuf::from)
                    .map_err(|_| WorkerError::Usage("arguments must be UTF-8".to_owned()))
            })
            .collect()
    }

    fn postgres_error(step: &'static str) -> impl FnOnce(postgresql_embedded::Error) -> WorkerError {
        move |err| WorkerError::Postgres {
            step,
            message: err.to_string(),
        }
    }

    fn run(args: &[Utf8PathBuf]) -> Result<(), WorkerError> {
        let [_, raw_step, payload_path] = args else {
            return Err(WorkerError::Usage(format!(
                "expected 2 arguments, got {}",
                args.len().saturating_sub(1)
            )));
        };
        let step = Step::try_from(raw_step.as_str())?;
        let payload = read_payload(payload_path)?;
        drop_privileges()?;
        let settings = payload
            .settings
            .into_settings()
            .map_err(|err| WorkerError::Settings(err.to_string()))?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(WorkerError::Runtime)?;
        apply_environment(&payload.environment);

        let mut postgres = PostgreSQL::new(settings);
        runtime.block_on(async {
            match step {
                Step::Setup => {
                    postgres
                        .setup()
                        .await
                        .map_err(postgres_error("setup"))?;
                    ensure_started(&mut postgres).await
                }
                Step::Start => {
                    ensure_started(&mut postgres).await?;
                    // The server must outlive this process.
                    std::mem::forget(postgres);
                    Ok(())
                }
                Step::Stop => postgres
                    .stop()
                    .await
                    .map_err(postgres_error("stop")),
            }
        })
    }

    async fn ensure_started(postgres: &mut PostgreSQL) -> Result<(), WorkerError> {
        if matches!(postgres.status(), Status::Started) {
            return Ok(());
        }
        postgres
            .start()
            .await
            .map_err(postgres_error("start"))
    }

    fn read_payload(path: &Utf8Path) -> Result<WorkerPayload, WorkerError> {
        let read = || -> Result<Vec<u8>, BoxError> {
            let (dir, relative) = ambient_dir_and_path(path)?;
            let mut bytes = Vec::new();
            dir.open(relative.as_std_path())?.read_to_end(&mut bytes)?;
            Ok(bytes)
        };
        let bytes = read().map_err(WorkerError::PayloadRead)?;
        serde_json::from_slice(&bytes).map_err(WorkerError::PayloadParse)
    }

    /// Re-runs this binary as [`SERVICE_USER`] when invoked as root, then
    /// exits with the child's status.
    fn reexec_unprivileged(args: &[Utf8PathBuf]) -> Result<(), WorkerError> {
        if !Uid::effective().is_root() || env::var_os(REEXEC_ENV).is_some() {
            return Ok(());
        }
        let exe = env::current_exe()
            .map_err(WorkerError::Runtime)?
            .into_os_string()
            .into_string()
            .map(Utf8PathBuf::from)
            .map_err(|_| WorkerError::Usage("executable path must be UTF-8".to_owned()))?;
        let forwarded = args.iter().skip(1);

        let status = match Command::new("runuser")
            .args(["-u", SERVICE_USER, "--"])
            .arg(exe.as_std_path())
            .args(forwarded.clone().map(|arg| arg.as_std_path()))
            .env(REEXEC_ENV, "1")
            .env("PATH", TRUSTED_PATH)
            .status()
        {
            Ok(status) => status,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                run_via_su(&exe, forwarded)?
            }
            Err(err) => return Err(WorkerError::Privileges(err.to_string())),
        };
        std::process::exit(status.code().unwrap_or(1));
    }

    fn run_via_su<'a>(
        exe: &Utf8Path,
        args: impl Iterator<Item = &'a Utf8PathBuf>,
    ) -> Result<ExitStatus, WorkerError> {
        let command = std::iter::once(exe.as_str())
            .chain(args.map(|arg| arg.as_str()))
            .map(shell_quote)
            .fold(format!("{REEXEC_ENV}=1 exec"), |mut line, word| {
                line.push(' ');
                line.push_str(&word);
                line
            });
        Command::new("/bin/su")
            .args(["-s", "/bin/sh", SERVICE_USER, "-c"])
            .arg(command)
            .env("PATH", TRUSTED_PATH)
            .status()
            .map_err(|err| WorkerError::Privileges(err.to_string()))
    }

    fn shell_quote(word: &str) -> String {
        format!("'{}'", word.replace('\'', r"'\''"))
    }

    fn drop_privileges() -> Result<(), WorkerError> {
        if !Uid::effective().is_root() {
            return Ok(());
        }
        let user = User::from_name(SERVICE_USER)
            .map_err(|err| WorkerError::Privileges(err.to_string()))?
            .ok_or_else(|| WorkerError::Privileges(format!("user '{SERVICE_USER}' not found")))?;
        let name = CString::new(user.name.clone())
            .map_err(|err| WorkerError::Privileges(err.to_string()))?;
        initgroups(&name, user.gid).map_err(|err| WorkerError::Privileges(err.to_string()))?;
        setgid(user.gid).map_err(|err| WorkerError::Privileges(err.to_string()))?;
        setuid(user.uid).map_err(|err| WorkerError::Privileges(err.to_string()))?;

        // SAFETY: no other thread exists yet; the runtime is built afterwards.
        unsafe {
            env::set_var("HOME", &user.dir);
            env::set_var("USER", &user.name);
            env::set_var("LOGNAME", &user.name);
        }
        Ok(())
    }

    fn apply_environment(environment: &[(String, Option<PlainSecret>)]) {
        for (key, value) in environment {
            // SAFETY: the current-thread runtime has not spawned any worker
            // threads and nothing else reads the environment concurrently.
            unsafe {
                match value {
                    Some(secret) => env::set_var(key, secret.expose()),
                    None => env::remove_var(key),
                }
            }
        }
    }

}
