//! Host platform identification for `UNAME_SYSNAME`.
//!
//! Some interpreters (Python 3.2 among them) never exposed `UNAME_SYSNAME` to
//! compile-time code, so the generated file always carries it. Detection may
//! come back empty; [`resolve_platform_name`] then substitutes a fixed
//! fallback instead of failing the build.

/// Fallback platform family used when the host reports nothing.
#[cfg(target_os = "windows")]
pub const DEFAULT_PLATFORM_FALLBACK: &str = "Windows";
#[cfg(target_os = "macos")]
pub const DEFAULT_PLATFORM_FALLBACK: &str = "Darwin";
#[cfg(target_os = "linux")]
pub const DEFAULT_PLATFORM_FALLBACK: &str = "Linux";
#[cfg(not(any(target_os = "windows", target_os = "macos", target_os = "linux")))]
pub const DEFAULT_PLATFORM_FALLBACK: &str = "Unknown";

/// Source of the operating system family name.
pub trait PlatformResolver {
    /// The kernel/OS name, or `None` when it cannot be determined.
    fn platform_name(&self) -> Option<String>;
}

impl<F> PlatformResolver for F
where
    F: Fn() -> Option<String>,
{
    fn platform_name(&self) -> Option<String> {
        self()
    }
}

/// Queries the running host.
#[derive(Debug, Clone, Copy, Default)]
pub struct HostPlatform;

impl PlatformResolver for HostPlatform {
    #[cfg(unix)]
    fn platform_name(&self) -> Option<String> {
        // SAFETY: an all-zero `utsname` is valid, and `uname` only writes into it.
        let mut info: libc::utsname = unsafe { std::mem::zeroed() };
        if unsafe { libc::uname(&mut info) } != 0 {
            return None;
        }
        // SAFETY: on success `sysname` holds a NUL-terminated string.
        let sysname = unsafe { std::ffi::CStr::from_ptr(info.sysname.as_ptr()) };
        Some(sysname.to_string_lossy().into_owned())
    }

    #[cfg(windows)]
    fn platform_name(&self) -> Option<String> {
        Some("Windows".to_string())
    }

    #[cfg(not(any(unix, windows)))]
    fn platform_name(&self) -> Option<String> {
        None
    }
}

/// A preconfigured answer, used for overrides and simulated hosts.
#[derive(Debug, Clone, Default)]
pub struct FixedPlatform(pub Option<String>);

impl FixedPlatform {
    pub fn new(name: impl Into<String>) -> Self {
        Self(Some(name.into()))
    }

    /// A host that reports no platform name at all.
    pub fn unreported() -> Self {
        Self(None)
    }
}

impl PlatformResolver for FixedPlatform {
    fn platform_name(&self) -> Option<String> {
        self.0.clone()
    }
}

/// Resolve the platform name, substituting `fallback` for a missing or blank
/// answer, and [`DEFAULT_PLATFORM_FALLBACK`] when `fallback` is blank too.
/// Never fails and never returns an empty string.
pub fn resolve_platform_name(resolver: &dyn PlatformResolver, fallback: &str) -> String {
    let reported = resolver.platform_name();
    if let Some(name) = reported.as_deref().map(str::trim) {
        if !name.is_empty() {
            return name.to_string();
        }
    }

    let fallback = match fallback.trim() {
        "" => DEFAULT_PLATFORM_FALLBACK,
        configured => configured,
    };
    log::warn!(
        "host platform name unavailable ({:?}), using fallback {:?}",
        reported,
        fallback
    );
    fallback.to_string()
}
