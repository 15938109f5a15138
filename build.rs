fn main() {
    #[cfg(feature = "python")]
    {
        pyo3_build_config::use_pyo3_cfgs();

        // Allow Py_GIL_DISABLED cfg check
        println!("cargo::rustc-check-cfg=cfg(py_sys_config, values(\"Py_GIL_DISABLED\"))");
    }
}
