use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use serde_json::Value;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated HOME with fake macOS tools wired in through the config file.
///
/// The fakes keep their state next to each path:
/// - `<path>.qtn` holds the quarantine value (absent = no attribute);
/// - `<path>.allowed` makes the Gatekeeper assessment pass;
/// - `<path>.locked` makes attribute removal fail;
/// - files containing `MACHO` are described as Mach-O binaries.
pub struct TestEnv {
    _tmp: TempDir,
    pub root: PathBuf,
    pub home: PathBuf,
    pub apps: PathBuf,
    pub brew_bin: PathBuf,
    pub casks_file: PathBuf,
    pub tools: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let root = tmp.path().to_path_buf();
        let home = root.join("home");
        let apps = root.join("Applications");
        let brew_bin = root.join("homebrew/bin");
        let tools = root.join("tools");
        for dir in [&home, &apps, &brew_bin, &tools] {
            fs::create_dir_all(dir).expect("create fixture dir");
        }

        write_script(
            &tools.join("xattr"),
            r#"case "$1" in
  -p) [ -f "$3.qtn" ] || exit 1; cat "$3.qtn" ;;
  -dr) [ -e "$3.locked" ] && exit 1; rm -f "$3.qtn" ;;
  *) exit 2 ;;
esac"#,
        );
        write_script(&tools.join("spctl"), r#"[ -f "$4.allowed" ] || exit 3"#);
        write_script(
            &tools.join("file"),
            r#"if grep -q MACHO "$1" 2>/dev/null; then
  echo "$1: Mach-O 64-bit executable arm64"
else
  echo "$1: POSIX shell script text executable, ASCII text"
fi"#,
        );
        write_script(&tools.join("sudo"), r#"exec "$@""#);
        write_script(
            &tools.join("brew"),
            r#"case "$*" in
  "info --cask --json=v2"*) cat "$(dirname "$0")/brew-info.json" ;;
  *) exit 1 ;;
esac"#,
        );

        let casks_file = root.join("casks.nix");
        let env = Self {
            _tmp: tmp,
            root,
            home,
            apps,
            brew_bin,
            casks_file,
            tools,
        };
        env.write_config();
        env
    }

    fn write_config(&self) {
        let config_dir = self.home.join(".config/unquarantine");
        fs::create_dir_all(&config_dir).expect("create config dir");
        let config = format!(
            r#"[tools]
xattr = "{tools}/xattr"
spctl = "{tools}/spctl"
file = "{tools}/file"
elevate = "{tools}/sudo"

[homebrew]
brew = "{tools}/brew"
prefix = "{root}/homebrew"
casks_file = "{casks}"

[locations]
app_dirs = ["{apps}"]

[output]
color = false
"#,
            tools = self.tools.display(),
            root = self.root.display(),
            casks = self.casks_file.display(),
            apps = self.apps.display(),
        );
        fs::write(config_dir.join("config.toml"), config).expect("write config");
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("unquarantine");
        cmd.env("HOME", &self.home).env_remove("RUST_LOG");
        cmd
    }

    pub fn run_json(&self, args: &[&str]) -> Value {
        let out = self
            .cmd()
            .arg("--json")
            .args(args)
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice(&out).expect("valid json output")
    }

    /// A Mach-O stand-in linked under the Homebrew prefix.
    pub fn binary(&self, name: &str) -> PathBuf {
        let path = self.brew_bin.join(name);
        fs::write(&path, "MACHO\0\0\0").expect("write binary");
        path
    }

    pub fn script(&self, name: &str) -> PathBuf {
        let path = self.brew_bin.join(name);
        fs::write(&path, "#!/bin/sh\nexec true\n").expect("write script");
        path
    }

    pub fn app(&self, name: &str) -> PathBuf {
        let path = self.apps.join(name);
        fs::create_dir_all(path.join("Contents/MacOS")).expect("create app bundle");
        path
    }

    pub fn quarantine(&self, path: &Path, value: &str) {
        fs::write(sidecar(path, "qtn"), value).expect("write quarantine value");
    }

    pub fn is_quarantined(&self, path: &Path) -> bool {
        sidecar(path, "qtn").exists()
    }

    pub fn allow(&self, path: &Path) {
        fs::write(sidecar(path, "allowed"), "").expect("write allowed marker");
    }

    pub fn lock(&self, path: &Path) {
        fs::write(sidecar(path, "locked"), "").expect("write locked marker");
    }

    pub fn brew_info(&self, info: &Value) {
        fs::write(
            self.tools.join("brew-info.json"),
            serde_json::to_string_pretty(info).expect("serialize brew info"),
        )
        .expect("write brew info");
    }

    pub fn audit_log(&self) -> String {
        fs::read_to_string(self.home.join(".config/unquarantine/audit.jsonl")).unwrap_or_default()
    }
}

fn sidecar(path: &Path, ext: &str) -> PathBuf {
    let mut s = path.as_os_str().to_owned();
    s.push(".");
    s.push(ext);
    PathBuf::from(s)
}

fn write_script(path: &Path, body: &str) {
    fs::write(path, format!("#!/bin/sh\n{body}\n")).expect("write fake tool");
    fs::set_permissions(path, fs::Permissions::from_mode(0o755)).expect("chmod fake tool");
}
