pub mod kubeconfig_fs_adapter;
