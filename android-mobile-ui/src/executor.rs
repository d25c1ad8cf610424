//! Handing work over to the thread that owns the Android view hierarchy.
//!
//! Android only lets the thread that created a view hierarchy touch it, so
//! every call that changes the window or its decor view is packaged as a
//! [`UiTask`] and posted to a [`UiExecutor`]. Posting never blocks and there is
//! no completion signal.

use std::collections::VecDeque;
use std::fmt;
use std::sync::{Arc, Mutex};

use crate::platform::Platform;

pub type UiTask = Box<dyn FnOnce() + Send + 'static>;

/// Something that can run [`UiTask`]s on the UI thread
pub trait UiExecutor: Send + Sync {
    fn post(&self, task: UiTask);
}

/// Runs each task immediately on the posting thread
///
/// Only correct when everything that uses the bridge already runs on the UI
/// thread.
#[derive(Debug, Default, Clone, Copy)]
pub struct InlineExecutor;

impl UiExecutor for InlineExecutor {
    fn post(&self, task: UiTask) {
        task()
    }
}

/// A FIFO of tasks that the UI thread drains with [`UiQueue::run_pending()`]
///
/// The optional waker is called after every post and has to get the UI thread
/// to call [`UiQueue::run_pending()`] soon.
///
/// The UI thread is the Activity's Java main thread. With `android-activity`
/// that is *not* the thread running `android_main()`, so draining the queue
/// from `AndroidApp::poll_events()` would make Android throw
/// `CalledFromWrongThreadException`. Instead the Activity subclass exposes a
/// method that hops onto its main thread and calls back into native code:
///
/// ```java
/// public class MainActivity extends NativeActivity {
///     public void scheduleUiDrain() {
///         runOnUiThread(this::runPendingUiTasks);
///     }
///     private native void runPendingUiTasks();
/// }
/// ```
///
/// [`UiQueue::waking_activity()`] builds a queue whose waker calls that
/// method, and the native half drains it:
///
/// ```ignore
/// static UI_QUEUE: OnceLock<Arc<UiQueue>> = OnceLock::new();
///
/// #[no_mangle]
/// fn android_main(app: AndroidApp) {
///     let queue = UI_QUEUE.get_or_init(|| {
///         Arc::new(UiQueue::waking_activity("scheduleUiDrain").unwrap())
///     });
///     let bridge = AndroidUiBridge::from_android_context(queue.clone(), Default::default()).unwrap();
///     // ...
/// }
///
/// #[allow(non_snake_case)]
/// #[no_mangle]
/// pub extern "C" fn Java_com_example_app_MainActivity_runPendingUiTasks(
///     _env: jni::JNIEnv,
///     _activity: jni::objects::JObject,
/// ) {
///     if let Some(queue) = UI_QUEUE.get() {
///         queue.run_pending();
///     }
/// }
/// ```
///
/// Several posts may schedule several drains; the extra ones find the queue
/// empty and return straight away.
pub struct UiQueue {
    tasks: Mutex<VecDeque<UiTask>>,
    waker: Option<Box<dyn Fn() + Send + Sync>>,
}

impl UiQueue {
    pub fn new() -> Self {
        Self {
            tasks: Mutex::new(VecDeque::new()),
            waker: None,
        }
    }

    pub fn with_waker<W>(waker: W) -> Self
    where
        W: Fn() + Send + Sync + 'static,
    {
        Self {
            tasks: Mutex::new(VecDeque::new()),
            waker: Some(Box::new(waker)),
        }
    }

    /// Number of tasks waiting to run
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Runs every task that was posted before this call, in posting order,
    /// and returns how many ran.
    ///
    /// Must be called from the UI thread. Tasks run without the queue locked,
    /// so anything they post is left for the next call.
    pub fn run_pending(&self) -> usize {
        let batch = std::mem::take(&mut *self.lock());
        let count = batch.len();
        if count > 0 {
            log::trace!("Running {count} queued UI task(s)");
        }
        for task in batch {
            task();
        }
        count
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, VecDeque<UiTask>> {
        self.tasks.lock().unwrap()
    }
}

#[cfg(target_os = "android")]
impl UiQueue {
    /// A queue whose waker calls the public `void method()` of the Activity
    /// registered with [`ndk_context`] after every post
    ///
    /// The method is expected to schedule [`UiQueue::run_pending()`] on the
    /// Activity's main thread, e.g. through `Activity.runOnUiThread()`.
    pub fn waking_activity(method: &'static str) -> crate::Result<Self> {
        let platform = crate::jni_platform::JniPlatform::from_android_context()?;
        Ok(Self::with_waker(activity_method_waker(Arc::new(platform), method)))
    }
}

/// Waker that calls `method` on the Activity. Failures are logged, the task
/// stays queued for the next drain.
#[cfg_attr(not(target_os = "android"), allow(dead_code))]
pub(crate) fn activity_method_waker(
    platform: Arc<dyn Platform>,
    method: &'static str,
) -> impl Fn() + Send + Sync + 'static {
    move || {
        if let Err(err) = platform.call_activity_method(method) {
            log::warn!("Failed to wake the UI thread via {method}(): {err}");
        }
    }
}

impl Default for UiQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl UiExecutor for UiQueue {
    fn post(&self, task: UiTask) {
        self.lock().push_back(task);
        if let Some(waker) = &self.waker {
            waker();
        }
    }
}

impl fmt::Debug for UiQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UiQueue")
            .field("pending", &self.len())
            .field("has_waker", &self.waker.is_some())
            .finish()
    }
}
