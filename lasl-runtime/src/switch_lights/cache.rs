//! # Module Cache
//!
//! 能力注册表：模块类型名 → 适配器。
//!
//! ## 注册顺序
//!
//! 适配器通过 [`ModuleCacheBuilder::register`] 显式注册，注册顺序就是优先级：
//! 两个适配器声明同一个模块类型名时，**后注册的生效**，并输出一条警告。
//! 新增适配器只需多注册一次，不需要改动调度逻辑。

use std::collections::HashMap;
use std::rc::Rc;
use tracing::{debug, warn};

use super::adapter::{Binding, SwitchLights};
use super::handle::PartModule;

/// 能力注册表
///
/// 构建后不可变。
pub struct ModuleCache {
    modules: HashMap<String, Rc<dyn SwitchLights>>,
    module_names: Vec<String>,
}

/// 注册表构建器
#[derive(Default)]
pub struct ModuleCacheBuilder {
    adapters: Vec<Rc<dyn SwitchLights>>,
}

impl ModuleCacheBuilder {
    /// 注册一个适配器
    pub fn register<A: SwitchLights + 'static>(self, adapter: A) -> Self {
        self.register_shared(Rc::new(adapter))
    }

    /// 注册一个已共享的适配器实例
    pub fn register_shared(mut self, adapter: Rc<dyn SwitchLights>) -> Self {
        self.adapters.push(adapter);
        self
    }

    /// 已注册的适配器数量
    pub fn len(&self) -> usize {
        self.adapters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }

    /// 构建注册表
    pub fn build(self) -> ModuleCache {
        let mut modules: HashMap<String, Rc<dyn SwitchLights>> = HashMap::new();

        for adapter in self.adapters {
            debug!(
                adapter = adapter.name(),
                modules = ?adapter.module_names(),
                "注册灯光适配器"
            );
            for &name in adapter.module_names() {
                if let Some(previous) = modules.insert(name.to_string(), Rc::clone(&adapter)) {
                    warn!(
                        module = name,
                        previous = previous.name(),
                        current = adapter.name(),
                        "模块类型被重复声明，后注册的适配器生效"
                    );
                }
            }
        }

        let mut module_names: Vec<String> = modules.keys().cloned().collect();
        module_names.sort();
        debug!(count = module_names.len(), modules = ?module_names, "可用的灯光模块");

        ModuleCache {
            modules,
            module_names,
        }
    }
}

impl ModuleCache {
    /// 创建构建器
    pub fn builder() -> ModuleCacheBuilder {
        ModuleCacheBuilder::default()
    }

    /// 该模块类型是否有适配器
    pub fn supports(&self, module: &dyn PartModule) -> bool {
        self.supports_name(module.module_name())
    }

    /// 该模块类型名是否有适配器
    pub fn supports_name(&self, module_name: &str) -> bool {
        self.modules.contains_key(module_name)
    }

    /// 按模块类型名取适配器
    pub fn adapter(&self, module_name: &str) -> Option<&Rc<dyn SwitchLights>> {
        self.modules.get(module_name)
    }

    /// 解析模块的绑定
    ///
    /// 没有模块或模块类型未注册时返回 [`Binding::Absent`]。
    pub fn lookup(&self, module: Option<&Rc<dyn PartModule>>) -> Binding {
        let Some(module) = module else {
            return Binding::Absent;
        };
        match self.modules.get(module.module_name()) {
            Some(adapter) => Binding::Bound {
                module: Rc::clone(module),
                adapter: Rc::clone(adapter),
            },
            None => Binding::Absent,
        }
    }

    /// 所有已注册的模块类型名（排序）
    pub fn module_names(&self) -> &[String] {
        &self.module_names
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

impl std::fmt::Debug for ModuleCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModuleCache")
            .field("module_names", &self.module_names)
            .finish()
    }
}
