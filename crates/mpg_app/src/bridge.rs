//! Lifecycle entry points for an embedding host (the Android shell).
//!
//! The host owns a `HostBridge` handle and passes it into every call; there
//! is no process-wide instance. The three calls mirror the host activity
//! lifecycle:
//!
//!   init    -> construct and initialize the app, once
//!   run     -> run the app's loop if one exists
//!   cleanup -> destroy the app; safe when there is none
//!
//! `ffi` exposes the same calls over the C ABI with the handle as an opaque
//! pointer; `android` wraps them as JNI methods of `MainActivity`.

use mpg_platform::Platform;

use crate::app::App;
use crate::winit_surface::WinitPlatform;

pub struct HostBridge<P: Platform> {
    make_platform: Box<dyn FnMut() -> P>,
    build_tool: String,
    app: Option<App<P>>,
}

impl HostBridge<WinitPlatform> {
    pub fn new(build_tool: &str) -> Self {
        Self::with_platform(build_tool, WinitPlatform::default)
    }
}

impl<P: Platform> HostBridge<P> {
    pub fn with_platform(build_tool: &str, make_platform: impl FnMut() -> P + 'static) -> Self {
        Self {
            make_platform: Box::new(make_platform),
            build_tool: build_tool.to_string(),
            app: None,
        }
    }

    /// Construct and initialize the app unless one already exists.
    ///
    /// A failed initialize still keeps the instance, so a later `run` is a
    /// no-op rather than a second startup attempt. Returns whether the app is
    /// ready to run.
    pub fn init(&mut self) -> bool {
        if let Some(app) = &self.app {
            log::debug!("Host bridge init: app already constructed");
            return app.is_running();
        }

        let mut app = App::new((self.make_platform)(), &self.build_tool);
        let ready = match app.initialize() {
            Ok(()) => true,
            Err(err) => {
                log::error!("Failed to initialize application: {}", err);
                false
            }
        };
        self.app = Some(app);
        ready
    }

    pub fn run(&mut self) {
        match self.app.as_mut() {
            Some(app) => app.run(),
            None => log::debug!("Host bridge run: no app"),
        }
    }

    pub fn cleanup(&mut self) {
        if let Some(mut app) = self.app.take() {
            app.cleanup();
        }
    }

    pub fn app(&self) -> Option<&App<P>> {
        self.app.as_ref()
    }

    pub fn build_tool(&self) -> &str {
        &self.build_tool
    }
}

/// Label the bridge reports for its builds.
pub fn bridge_build_tool() -> &'static str {
    if cfg!(target_os = "android") {
        "Gradle/Android"
    } else {
        crate::build_tool_label()
    }
}

pub mod ffi {
    //! C ABI for hosts that embed the library directly.

    use super::{bridge_build_tool, HostBridge};
    use crate::winit_surface::WinitPlatform;

    pub type BridgeHandle = HostBridge<WinitPlatform>;

    /// Allocate a bridge. Release it with `mpg_bridge_free`.
    #[no_mangle]
    pub extern "C" fn mpg_bridge_new() -> *mut BridgeHandle {
        let _ = env_logger::try_init();
        Box::into_raw(Box::new(HostBridge::new(bridge_build_tool())))
    }

    /// # Safety
    /// `bridge` must be null or a pointer returned by `mpg_bridge_new` that
    /// has not been freed.
    #[no_mangle]
    pub unsafe extern "C" fn mpg_bridge_init(bridge: *mut BridgeHandle) -> bool {
        match unsafe { bridge.as_mut() } {
            Some(bridge) => bridge.init(),
            None => {
                log::error!("mpg_bridge_init: null handle");
                false
            }
        }
    }

    /// # Safety
    /// Same contract as `mpg_bridge_init`.
    #[no_mangle]
    pub unsafe extern "C" fn mpg_bridge_run(bridge: *mut BridgeHandle) {
        if let Some(bridge) = unsafe { bridge.as_mut() } {
            bridge.run();
        }
    }

    /// # Safety
    /// Same contract as `mpg_bridge_init`.
    #[no_mangle]
    pub unsafe extern "C" fn mpg_bridge_cleanup(bridge: *mut BridgeHandle) {
        if let Some(bridge) = unsafe { bridge.as_mut() } {
            bridge.cleanup();
        }
    }

    /// # Safety
    /// `bridge` must be null or a live pointer from `mpg_bridge_new`; it is
    /// invalid after this call.
    #[no_mangle]
    pub unsafe extern "C" fn mpg_bridge_free(bridge: *mut BridgeHandle) {
        if !bridge.is_null() {
            drop(unsafe { Box::from_raw(bridge) });
        }
    }
}

#[cfg(target_os = "android")]
pub mod android {
    //! JNI entry points for `com.multiplatform.gui.MainActivity`. The
    //! activity keeps the handle returned by `nativeInit` in a `long` field
    //! and hands it back to the other two calls.

    use jni::objects::JObject;
    use jni::sys::jlong;
    use jni::JNIEnv;

    use super::ffi::{mpg_bridge_cleanup, mpg_bridge_free, mpg_bridge_init, BridgeHandle};
    use super::{bridge_build_tool, HostBridge};

    #[no_mangle]
    pub extern "system" fn Java_com_multiplatform_gui_MainActivity_nativeInit(
        _env: JNIEnv,
        _this: JObject,
    ) -> jlong {
        android_logger::init_once(
            android_logger::Config::default().with_max_level(log::LevelFilter::Info),
        );
        let bridge = Box::into_raw(Box::new(HostBridge::new(bridge_build_tool())));
        // SAFETY: freshly allocated above.
        unsafe { mpg_bridge_init(bridge) };
        bridge as jlong
    }

    #[no_mangle]
    pub extern "system" fn Java_com_multiplatform_gui_MainActivity_nativeRun(
        _env: JNIEnv,
        _this: JObject,
        handle: jlong,
    ) {
        let bridge = handle as *mut BridgeHandle;
        // SAFETY: the activity only passes handles from nativeInit, or 0.
        if let Some(bridge) = unsafe { bridge.as_mut() } {
            bridge.run();
        }
    }

    #[no_mangle]
    pub extern "system" fn Java_com_multiplatform_gui_MainActivity_nativeCleanup(
        _env: JNIEnv,
        _this: JObject,
        handle: jlong,
    ) {
        let bridge = handle as *mut BridgeHandle;
        // SAFETY: as above; the activity drops its handle after this call.
        unsafe {
            mpg_bridge_cleanup(bridge);
            mpg_bridge_free(bridge);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mpg_core::PlatformEvent;
    use mpg_platform::HeadlessPlatform;
    use std::cell::Cell;
    use std::rc::Rc;

    fn counting_bridge(
        script: Vec<Vec<PlatformEvent>>,
    ) -> (HostBridge<HeadlessPlatform>, Rc<Cell<usize>>) {
        let constructed = Rc::new(Cell::new(0));
        let counter = Rc::clone(&constructed);
        let bridge = HostBridge::with_platform("Gradle/Android", move || {
            counter.set(counter.get() + 1);
            HeadlessPlatform::new(script.clone())
        });
        (bridge, constructed)
    }

    #[test]
    fn init_constructs_once() {
        let (mut bridge, constructed) = counting_bridge(vec![vec![PlatformEvent::Quit]]);
        assert!(bridge.init());
        assert!(bridge.init());
        assert_eq!(constructed.get(), 1);
        assert_eq!(bridge.app().map(|app| app.build_tool()), Some("Gradle/Android"));
    }

    #[test]
    fn run_and_cleanup_without_init_are_no_ops() {
        let (mut bridge, constructed) = counting_bridge(Vec::new());
        bridge.run();
        bridge.cleanup();
        bridge.cleanup();
        assert_eq!(constructed.get(), 0);
        assert!(bridge.app().is_none());
    }

    #[test]
    fn full_lifecycle_runs_and_destroys_app() {
        let (mut bridge, _) = counting_bridge(vec![vec![PlatformEvent::left_click(760, 30)]]);
        assert!(bridge.init());
        bridge.run();
        let app = bridge.app().expect("app exists until cleanup");
        assert!(!app.is_running());
        assert!(app.panel().expect("panel").should_exit());

        bridge.cleanup();
        assert!(bridge.app().is_none());
    }

    #[test]
    fn init_after_cleanup_constructs_a_new_app() {
        let (mut bridge, constructed) = counting_bridge(vec![vec![PlatformEvent::Quit]]);
        bridge.init();
        bridge.cleanup();
        bridge.init();
        assert_eq!(constructed.get(), 2);
    }

    #[test]
    fn failed_init_keeps_instance_and_run_is_a_no_op() {
        let mut bridge = HostBridge::with_platform("Gradle/Android", || {
            HeadlessPlatform::failing("no native window")
        });
        assert!(!bridge.init());
        assert!(bridge.app().is_some());
        // A second init does not retry.
        assert!(!bridge.init());

        bridge.run();
        assert_eq!(bridge.app().map(|app| app.frame_count()), Some(0));
        bridge.cleanup();
        assert!(bridge.app().is_none());
    }

    #[test]
    fn ffi_calls_tolerate_null_handles() {
        let null = std::ptr::null_mut();
        unsafe {
            assert!(!ffi::mpg_bridge_init(null));
            ffi::mpg_bridge_run(null);
            ffi::mpg_bridge_cleanup(null);
            ffi::mpg_bridge_free(null);
        }
    }
}
