//! Distinguished name structures, owning and view variants.

use std::ffi::{CStr, CString};
use std::fmt;
use std::marker::PhantomData;
use std::ptr::{self, NonNull};

use libc::{c_int, c_void};

use crate::error::{OsslKitError, Result, cvt, cvt_p};
use crate::ffi;
use crate::handle::Handle;

/// A freshly built distinguished name with ownership of its native structure.
///
/// Copies share the same underlying structure; `==` compares the wrapped
/// pointer, not the name contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Name {
    handle: Handle<openssl_sys::X509_NAME>,
}

impl Name {
    /// Allocates a new empty name structure.
    pub fn new() -> Result<Name> {
        openssl_sys::init();
        let ptr = unsafe { openssl_sys::X509_NAME_new() };
        Ok(Name {
            handle: unsafe { Handle::owned(ptr, openssl_sys::X509_NAME_free) }?,
        })
    }

    /// Appends a UTF-8 attribute entry, e.g. `("CN", "server.local")`.
    pub fn append_entry(&mut self, field: &str, value: &str) -> Result<()> {
        let field = CString::new(field).map_err(|_| {
            OsslKitError::InvalidArgument("name field is not a valid C string".to_string())
        })?;

        cvt(unsafe {
            openssl_sys::X509_NAME_add_entry_by_txt(
                self.as_ptr(),
                field.as_ptr(),
                openssl_sys::MBSTRING_UTF8,
                value.as_ptr(),
                value.len() as c_int,
                -1,
                0,
            )
        })?;
        Ok(())
    }

    /// Borrows this name as a view.
    pub fn as_view(&self) -> NameRef<'_> {
        unsafe { NameRef::from_ptr(self.as_ptr()) }
    }

    /// Returns the raw native pointer without transferring ownership.
    pub fn as_ptr(&self) -> *mut openssl_sys::X509_NAME {
        self.handle.as_ptr()
    }
}

/// A non-owning view of a distinguished name.
///
/// The storage behind the view belongs to the parent it was extracted from (a
/// [`Certificate`](crate::x509::Certificate) or a [`Name`]); the borrow ties
/// the view to that parent, so a view can never outlive the memory it aliases.
/// Dropping a view never triggers the native destructor.
///
/// `==` compares the wrapped pointer. Use [`NameRef::same_contents`] for a
/// structural comparison.
#[derive(Clone, Copy)]
pub struct NameRef<'a> {
    ptr: NonNull<openssl_sys::X509_NAME>,
    _parent: PhantomData<&'a ()>,
}

impl<'a> NameRef<'a> {
    /// # Safety
    ///
    /// `ptr` must be non-null and point to a native name structure that stays
    /// alive for `'a`.
    pub(crate) unsafe fn from_ptr(ptr: *mut openssl_sys::X509_NAME) -> NameRef<'a> {
        NameRef {
            ptr: unsafe { NonNull::new_unchecked(ptr) },
            _parent: PhantomData,
        }
    }

    /// Compares the name contents with `other`, field by field.
    pub fn same_contents(&self, other: &NameRef<'_>) -> bool {
        unsafe { ffi::X509_NAME_cmp(self.as_ptr(), other.as_ptr()) == 0 }
    }

    /// Renders the name as a one-line string, e.g. `/CN=server.local/O=Acme`.
    pub fn to_text(&self) -> Result<String> {
        let raw = cvt_p(unsafe { ffi::X509_NAME_oneline(self.as_ptr(), ptr::null_mut(), 0) })?;
        let text = unsafe { CStr::from_ptr(raw) }.to_string_lossy().into_owned();

        // X509_NAME_oneline allocated the buffer through the native allocator.
        unsafe {
            openssl_sys::CRYPTO_free(
                raw as *mut c_void,
                c"name.rs".as_ptr(),
                line!() as c_int,
            );
        }

        Ok(text)
    }

    /// Returns the raw native pointer. The parent keeps ownership.
    pub fn as_ptr(&self) -> *mut openssl_sys::X509_NAME {
        self.ptr.as_ptr()
    }
}

impl PartialEq for NameRef<'_> {
    /// Identity comparison: same underlying pointer, not same contents.
    fn eq(&self, other: &Self) -> bool {
        self.ptr == other.ptr
    }
}

impl Eq for NameRef<'_> {}

impl fmt::Debug for NameRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_text() {
            Ok(text) => write!(f, "NameRef({text:?})"),
            Err(_) => write!(f, "NameRef({:?})", self.ptr),
        }
    }
}
