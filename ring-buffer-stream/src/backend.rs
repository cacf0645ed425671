//! Backend the demo streams on
//!
//! Windows live on the CPU through `NdArray` unless the binary is built with
//! `--features wgpu`, which moves every update onto the GPU. The `--verify`
//! host check always reads the window back to host memory, whichever backend
//! runs the updates.

use cfg_if::cfg_if;

cfg_if! {
    if #[cfg(feature = "wgpu")] {
        use burn::backend::wgpu::{Wgpu, WgpuDevice};

        /// GPU backend holding the streamed window.
        pub type SelectedBackend = Wgpu;
        /// Device the window is allocated on.
        pub type SelectedDevice = WgpuDevice;

        /// Default GPU adapter.
        pub fn create_device() -> SelectedDevice {
            WgpuDevice::default()
        }

        /// Backend label for the startup log line.
        pub const fn get_backend_name() -> &'static str {
            "WGPU (GPU)"
        }
    } else {
        use burn::backend::ndarray::{NdArray, NdArrayDevice};

        /// CPU backend holding the streamed window.
        pub type SelectedBackend = NdArray;
        /// Device the window is allocated on.
        pub type SelectedDevice = NdArrayDevice;

        /// The host CPU.
        pub fn create_device() -> SelectedDevice {
            NdArrayDevice::default()
        }

        /// Backend label for the startup log line.
        pub const fn get_backend_name() -> &'static str {
            "NdArray (CPU)"
        }
    }
}
