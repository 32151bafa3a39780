// Platform camera bridge
//
// On Android the camera and image picker are launched through MainActivity over
// JNI and polled for a result. Other platforms report the camera as unavailable.

use crate::capabilities::{Camera, CapabilityFuture};
use crate::error::{GalleryResult, PhotoGalleryError};
use crate::models::{CameraOptions, CameraPhoto, CameraSource};

const DEFAULT_MAIN_ACTIVITY_CLASS: &str = "dev/dioxus/main/MainActivity";

#[cfg(target_os = "android")]
const POLL_INTERVAL: std::time::Duration = std::time::Duration::from_millis(100);
#[cfg(target_os = "android")]
const POLL_ATTEMPTS: u32 = 600; // 60 seconds

#[cfg(target_os = "android")]
use jni::objects::{JClass, JObject, JString, JValue};

#[cfg(target_os = "android")]
use ndk_context::android_context;

/// Configuration for the camera bridge on Android
#[derive(Debug, Clone)]
pub struct AndroidPickerConfig {
    /// Fully qualified class name in slash format (e.g., "com/example/myapp/MainActivity")
    pub main_activity_class: String,
}

impl Default for AndroidPickerConfig {
    fn default() -> Self {
        Self {
            main_activity_class: DEFAULT_MAIN_ACTIVITY_CLASS.to_string(),
        }
    }
}

/// Camera capability backed by the device camera app or image picker
#[derive(Debug, Clone, Default)]
pub struct DeviceCamera {
    config: AndroidPickerConfig,
}

impl DeviceCamera {
    pub fn new(config: AndroidPickerConfig) -> Self {
        Self { config }
    }
}

impl Camera for DeviceCamera {
    fn get_photo<'a>(
        &'a self,
        options: &'a CameraOptions,
    ) -> CapabilityFuture<'a, GalleryResult<CameraPhoto>> {
        let config = self.config.clone();
        let source = options.source;
        Box::pin(async move {
            // Intent-based capture has no quality knob; the app saves full size.
            log::debug!("Launching {:?} (quality {})", source, options.quality);
            let path = tokio::task::spawn_blocking(move || launch(&config, source))
                .await
                .map_err(|e| {
                    PhotoGalleryError::CapabilityUnavailable(format!("Camera task failed: {}", e))
                })??;

            Ok(CameraPhoto {
                path: Some(path),
                web_path: None,
            })
        })
    }
}

#[cfg(target_os = "android")]
fn jni_error(context: &str, e: impl std::fmt::Display) -> PhotoGalleryError {
    PhotoGalleryError::CapabilityUnavailable(format!("{}: {}", context, e))
}

#[cfg(target_os = "android")]
fn get_app_class_loader<'a>(env: &mut jni::JNIEnv<'a>) -> GalleryResult<JObject<'a>> {
    let at_cls = env
        .find_class("android/app/ActivityThread")
        .map_err(|e| jni_error("ActivityThread not found", e))?;
    let at = env
        .call_static_method(
            &at_cls,
            "currentActivityThread",
            "()Landroid/app/ActivityThread;",
            &[],
        )
        .and_then(|v| v.l())
        .map_err(|e| jni_error("currentActivityThread failed", e))?;

    let app = env
        .call_method(&at, "getApplication", "()Landroid/app/Application;", &[])
        .and_then(|v| v.l())
        .map_err(|e| jni_error("getApplication failed", e))?;

    // Before the application is bound, fall back to the system context
    let context = if app.is_null() {
        env.call_method(&at, "getSystemContext", "()Landroid/app/ContextImpl;", &[])
            .and_then(|v| v.l())
            .map_err(|e| jni_error("getSystemContext failed", e))?
    } else {
        app
    };

    env.call_method(&context, "getClassLoader", "()Ljava/lang/ClassLoader;", &[])
        .and_then(|v| v.l())
        .map_err(|e| jni_error("getClassLoader failed", e))
}

#[cfg(target_os = "android")]
fn load_class<'a>(
    env: &mut jni::JNIEnv<'a>,
    loader: &JObject<'a>,
    fq_slash: &str,
) -> GalleryResult<JClass<'a>> {
    let name: JString = env
        .new_string(fq_slash.replace('/', "."))
        .map_err(|e| jni_error("new_string failed", e))?;
    let cls_obj = env
        .call_method(
            loader,
            "loadClass",
            "(Ljava/lang/String;)Ljava/lang/Class;",
            &[JValue::Object(&JObject::from(name))],
        )
        .and_then(|v| v.l())
        .map_err(|e| jni_error("ClassLoader.loadClass failed", e))?;
    Ok(JClass::from(cls_obj))
}

#[cfg(target_os = "android")]
fn get_activity_instance<'a>(
    env: &mut jni::JNIEnv<'a>,
    config: &AndroidPickerConfig,
) -> GalleryResult<(JObject<'a>, JClass<'a>)> {
    let loader = get_app_class_loader(env)?;
    let cls = load_class(env, &loader, &config.main_activity_class)?;
    let signature = format!("()L{};", config.main_activity_class);

    // `@JvmStatic getInstance()` first, then the Kotlin companion object
    let instance = match env
        .call_static_method(&cls, "getInstance", &signature, &[])
        .and_then(|v| v.l())
    {
        Ok(obj) => obj,
        Err(_) => {
            if env.exception_check().unwrap_or(false) {
                let _ = env.exception_clear();
            }
            let comp_signature = format!("L{}$Companion;", config.main_activity_class);
            let companion = env
                .get_static_field(&cls, "Companion", &comp_signature)
                .and_then(|v| v.l())
                .map_err(|e| jni_error("Companion field unavailable", e))?;
            if companion.is_null() {
                return Err(PhotoGalleryError::CapabilityUnavailable(
                    "MainActivity.Companion is null, activity not initialized".to_string(),
                ));
            }
            env.call_method(&companion, "getInstance", &signature, &[])
                .and_then(|v| v.l())
                .map_err(|e| jni_error("Companion.getInstance() failed", e))?
        }
    };

    if instance.is_null() {
        return Err(PhotoGalleryError::CapabilityUnavailable(
            "MainActivity instance is null, activity not initialized".to_string(),
        ));
    }

    Ok((instance, cls))
}

/// Reads a nullable static String getter on the activity class
#[cfg(target_os = "android")]
fn static_string(
    env: &mut jni::JNIEnv<'_>,
    cls: &JClass<'_>,
    getter: &str,
) -> GalleryResult<Option<String>> {
    let Ok(obj) = env
        .call_static_method(cls, getter, "()Ljava/lang/String;", &[])
        .and_then(|v| v.l())
    else {
        return Ok(None);
    };
    if obj.is_null() {
        return Ok(None);
    }
    let value: String = env
        .get_string((&obj).into())
        .map_err(|e| jni_error("String conversion failed", e))?
        .into();
    Ok(Some(value))
}

#[cfg(target_os = "android")]
fn launch(config: &AndroidPickerConfig, source: CameraSource) -> GalleryResult<String> {
    let vm_ptr = android_context().vm() as *mut *const jni::sys::JNIInvokeInterface_;
    let vm = unsafe { jni::JavaVM::from_raw(vm_ptr) }.map_err(|e| jni_error("JavaVM failed", e))?;
    let mut env = vm
        .attach_current_thread()
        .map_err(|e| jni_error("JNI attach failed", e))?;

    let (activity, main_cls) = get_activity_instance(&mut env, config)?;

    env.call_static_method(&main_cls, "clearLastError", "()V", &[])
        .map_err(|e| jni_error("clearLastError failed", e))?;

    let launcher = match source {
        CameraSource::Camera => "launchCamera",
        CameraSource::Photos => "launchImagePicker",
    };
    env.call_method(&activity, launcher, "()V", &[])
        .map_err(|e| jni_error(launcher, e))?;

    for _ in 0..POLL_ATTEMPTS {
        std::thread::sleep(POLL_INTERVAL);

        if let Some(path) = static_string(&mut env, &main_cls, "getLastPhotoPath")? {
            return Ok(path);
        }
        if let Some(err) = static_string(&mut env, &main_cls, "getLastError")? {
            return Err(PhotoGalleryError::PermissionDenied(err));
        }
    }

    Err(PhotoGalleryError::CapabilityUnavailable(format!(
        "{} timed out, no photo taken",
        launcher
    )))
}

#[cfg(not(target_os = "android"))]
fn launch(_config: &AndroidPickerConfig, source: CameraSource) -> GalleryResult<String> {
    Err(PhotoGalleryError::CapabilityUnavailable(format!(
        "{:?} not available on this platform",
        source
    )))
}

#[cfg(all(test, not(target_os = "android")))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_camera_unavailable_off_device() {
        let camera = DeviceCamera::default();
        let options = CameraOptions::capture();

        let err = camera.get_photo(&options).await.unwrap_err();
        assert!(matches!(err, PhotoGalleryError::CapabilityUnavailable(_)));
    }
}
